//! Table-valued-function support types.

use std::collections::HashSet;
use std::fmt;

use crate::datatype::DataType;

/// One column of a relation argument's declared input schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvfColumn {
    pub name: String,
    pub datatype: DataType,
}

impl TvfColumn {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        TvfColumn {
            name: name.into(),
            datatype,
        }
    }
}

/// The input column schema a relation argument may require.
///
/// A relation argument without a schema accepts any relation; with a schema,
/// the call site's relation must provide at least these columns (exactly
/// these if the argument disallows extra columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvfRelation {
    columns: Vec<TvfColumn>,
}

impl TvfRelation {
    pub fn new(columns: Vec<TvfColumn>) -> Self {
        TvfRelation { columns }
    }

    pub fn columns(&self) -> &[TvfColumn] {
        &self.columns
    }

    /// Return the first column name that appears more than once, comparing
    /// case-insensitively.
    pub fn duplicate_column_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.to_ascii_lowercase()) {
                return Some(&column.name);
            }
        }
        None
    }

    /// SQL declaration form, e.g. `TABLE<user_id INT64, name STRING>`.
    pub fn sql_declaration(&self) -> String {
        format!(
            "TABLE<{}>",
            self.columns
                .iter()
                .map(|c| format!("{} {}", c.name, c.datatype.sql_name()))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl fmt::Display for TvfRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_declaration())
    }
}
