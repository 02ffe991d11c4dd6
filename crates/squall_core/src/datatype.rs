use std::fmt;

/// Metadata associated with decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalTypeMeta {
    pub precision: u8,
    pub scale: i8,
}

impl DecimalTypeMeta {
    pub const fn new(precision: u8, scale: i8) -> Self {
        DecimalTypeMeta { precision, scale }
    }
}

/// Metadata associated with arrays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayTypeMeta {
    pub element: Box<DataType>,
}

/// Metadata associated with structs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTypeMeta {
    pub fields: Vec<(String, DataType)>,
}

/// Metadata for types identified by a fully qualified name (proto messages,
/// enums). The name is resolved against an external descriptor pool; this
/// crate treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedTypeMeta {
    pub name: String,
}

/// Concrete types an argument or result may be declared with.
///
/// Some types include additional metadata which refines the type further.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// 64-bit decimal.
    Decimal64(DecimalTypeMeta),
    Utf8,
    Binary,
    /// Days since epoch.
    Date,
    /// Microseconds since epoch.
    Timestamp,
    Interval,
    /// An array of values all of the same type.
    Array(ArrayTypeMeta),
    /// A struct of different types.
    Struct(StructTypeMeta),
    /// A proto message type.
    Proto(NamedTypeMeta),
    /// A proto enum type.
    Enum(NamedTypeMeta),
}

impl DataType {
    /// Create an array type with the given element type.
    pub fn array(element: DataType) -> Self {
        DataType::Array(ArrayTypeMeta {
            element: Box::new(element),
        })
    }

    pub fn struct_type(fields: Vec<(String, DataType)>) -> Self {
        DataType::Struct(StructTypeMeta { fields })
    }

    pub fn proto(name: impl Into<String>) -> Self {
        DataType::Proto(NamedTypeMeta { name: name.into() })
    }

    pub fn enum_type(name: impl Into<String>) -> Self {
        DataType::Enum(NamedTypeMeta { name: name.into() })
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, DataType::Array(_))
    }

    pub const fn is_struct(&self) -> bool {
        matches!(self, DataType::Struct(_))
    }

    pub const fn is_proto(&self) -> bool {
        matches!(self, DataType::Proto(_))
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int32
                | DataType::Int64
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Float32
                | DataType::Float64
                | DataType::Decimal64(_)
        )
    }

    /// Return if values of this type can be compared for equality.
    ///
    /// Proto values have no defined equality; composite types support
    /// equality when all of their element types do.
    pub fn supports_equality(&self) -> bool {
        match self {
            DataType::Proto(_) => false,
            DataType::Array(meta) => meta.element.supports_equality(),
            DataType::Struct(meta) => meta.fields.iter().all(|(_, t)| t.supports_equality()),
            _ => true,
        }
    }

    /// Return if values of this type have a defined ordering.
    pub const fn supports_ordering(&self) -> bool {
        !matches!(
            self,
            DataType::Array(_) | DataType::Struct(_) | DataType::Proto(_)
        )
    }

    /// The type's name in SQL declarations, e.g. `ARRAY<INT64>`.
    pub fn sql_name(&self) -> String {
        match self {
            DataType::Boolean => "BOOL".to_string(),
            DataType::Int32 => "INT32".to_string(),
            DataType::Int64 => "INT64".to_string(),
            DataType::UInt32 => "UINT32".to_string(),
            DataType::UInt64 => "UINT64".to_string(),
            DataType::Float32 => "FLOAT32".to_string(),
            DataType::Float64 => "FLOAT64".to_string(),
            DataType::Decimal64(meta) => {
                format!("DECIMAL({}, {})", meta.precision, meta.scale)
            }
            DataType::Utf8 => "STRING".to_string(),
            DataType::Binary => "BYTES".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::Interval => "INTERVAL".to_string(),
            DataType::Array(meta) => format!("ARRAY<{}>", meta.element.sql_name()),
            DataType::Struct(meta) => {
                format!(
                    "STRUCT<{}>",
                    meta.fields
                        .iter()
                        .map(|(name, typ)| format!("{name} {}", typ.sql_name()))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            DataType::Proto(meta) => format!("PROTO<{}>", meta.name),
            DataType::Enum(meta) => format!("ENUM<{}>", meta.name),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::Int32 => write!(f, "Int32"),
            Self::Int64 => write!(f, "Int64"),
            Self::UInt32 => write!(f, "UInt32"),
            Self::UInt64 => write!(f, "UInt64"),
            Self::Float32 => write!(f, "Float32"),
            Self::Float64 => write!(f, "Float64"),
            Self::Decimal64(meta) => write!(f, "Decimal64({},{})", meta.precision, meta.scale),
            Self::Utf8 => write!(f, "Utf8"),
            Self::Binary => write!(f, "Binary"),
            Self::Date => write!(f, "Date"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::Interval => write!(f, "Interval"),
            Self::Array(meta) => write!(f, "Array[{}]", meta.element),
            Self::Struct(meta) => {
                write!(
                    f,
                    "Struct {{{}}}",
                    meta.fields
                        .iter()
                        .map(|(name, typ)| format!("{name}: {typ}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::Proto(meta) => write!(f, "Proto<{}>", meta.name),
            Self::Enum(meta) => write!(f, "Enum<{}>", meta.name),
        }
    }
}
