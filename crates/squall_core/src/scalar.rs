use std::fmt;

use chrono::{DateTime, NaiveDate};
use squall_error::{Result, SquallError};

use crate::datatype::{ArrayTypeMeta, DataType};

/// Days between 0001-01-01 (CE day 1) and the unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// An array value along with its element type.
///
/// The element type is carried separately so empty arrays still have a
/// well-defined type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    element_type: DataType,
    values: Vec<ScalarValue>,
}

impl ArrayValue {
    pub fn try_new(element_type: DataType, values: Vec<ScalarValue>) -> Result<Self> {
        for value in &values {
            if value.datatype() != element_type {
                return Err(SquallError::new(format!(
                    "array element {value} does not have element type {element_type}"
                )));
            }
        }
        Ok(ArrayValue {
            element_type,
            values,
        })
    }

    pub fn element_type(&self) -> &DataType {
        &self.element_type
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }
}

/// A single scalar value, used for argument default values.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// A typed null.
    Null(DataType),
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Utf8(String),
    Binary(Vec<u8>),
    /// Days since epoch.
    Date(i32),
    /// Microseconds since epoch.
    Timestamp(i64),
    Array(ArrayValue),
}

impl ScalarValue {
    pub fn datatype(&self) -> DataType {
        match self {
            ScalarValue::Null(t) => t.clone(),
            ScalarValue::Boolean(_) => DataType::Boolean,
            ScalarValue::Int32(_) => DataType::Int32,
            ScalarValue::Int64(_) => DataType::Int64,
            ScalarValue::UInt32(_) => DataType::UInt32,
            ScalarValue::UInt64(_) => DataType::UInt64,
            ScalarValue::Float32(_) => DataType::Float32,
            ScalarValue::Float64(_) => DataType::Float64,
            ScalarValue::Utf8(_) => DataType::Utf8,
            ScalarValue::Binary(_) => DataType::Binary,
            ScalarValue::Date(_) => DataType::Date,
            ScalarValue::Timestamp(_) => DataType::Timestamp,
            ScalarValue::Array(arr) => DataType::Array(ArrayTypeMeta {
                element: Box::new(arr.element_type().clone()),
            }),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null(_))
    }

    /// Render the value as a SQL literal, e.g. for `DEFAULT` clauses in
    /// signature declarations.
    pub fn sql_literal(&self) -> String {
        match self {
            ScalarValue::Null(_) => "NULL".to_string(),
            ScalarValue::Boolean(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            ScalarValue::Int32(v) => v.to_string(),
            ScalarValue::Int64(v) => v.to_string(),
            ScalarValue::UInt32(v) => v.to_string(),
            ScalarValue::UInt64(v) => v.to_string(),
            ScalarValue::Float32(v) => v.to_string(),
            ScalarValue::Float64(v) => v.to_string(),
            ScalarValue::Utf8(s) => format!("'{}'", s.replace('\'', "''")),
            ScalarValue::Binary(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02x}")).collect();
                format!("b'\\x{hex}'")
            }
            ScalarValue::Date(days) => format!("DATE '{}'", format_date(*days)),
            ScalarValue::Timestamp(us) => format!("TIMESTAMP '{}'", format_timestamp(*us)),
            ScalarValue::Array(arr) => {
                format!(
                    "[{}]",
                    arr.values()
                        .iter()
                        .map(|v| v.sql_literal())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

fn format_date(days: i32) -> String {
    match days
        .checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
    {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("<days={days}>"),
    }
}

fn format_timestamp(us: i64) -> String {
    match DateTime::from_timestamp_micros(us) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f+00").to_string(),
        None => format!("<micros={us}>"),
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null(_) => write!(f, "NULL"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
            ScalarValue::Int32(v) => write!(f, "{v}"),
            ScalarValue::Int64(v) => write!(f, "{v}"),
            ScalarValue::UInt32(v) => write!(f, "{v}"),
            ScalarValue::UInt64(v) => write!(f, "{v}"),
            ScalarValue::Float32(v) => write!(f, "{v}"),
            ScalarValue::Float64(v) => write!(f, "{v}"),
            ScalarValue::Utf8(s) => write!(f, "\"{s}\""),
            ScalarValue::Binary(b) => write!(f, "<{} bytes>", b.len()),
            ScalarValue::Date(days) => write!(f, "{}", format_date(*days)),
            ScalarValue::Timestamp(us) => write!(f, "{}", format_timestamp(*us)),
            ScalarValue::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.values()
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int32(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}
