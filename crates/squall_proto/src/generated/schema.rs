//! Type and value messages.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmptyMeta {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DecimalTypeMeta {
    #[prost(uint32, tag = "1")]
    pub precision: u32,
    #[prost(int32, tag = "2")]
    pub scale: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArrayTypeMeta {
    #[prost(message, optional, boxed, tag = "1")]
    pub element: ::core::option::Option<::prost::alloc::boxed::Box<DataType>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StructTypeField {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub datatype: ::core::option::Option<DataType>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StructTypeMeta {
    #[prost(message, repeated, tag = "1")]
    pub fields: ::prost::alloc::vec::Vec<StructTypeField>,
}

/// Metadata for types identified by a fully qualified name (protos, enums).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NamedTypeMeta {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataType {
    #[prost(
        oneof = "data_type::Value",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17"
    )]
    pub value: ::core::option::Option<data_type::Value>,
}

/// Nested message and enum types in `DataType`.
pub mod data_type {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        TypeBoolean(super::EmptyMeta),
        #[prost(message, tag = "2")]
        TypeInt32(super::EmptyMeta),
        #[prost(message, tag = "3")]
        TypeInt64(super::EmptyMeta),
        #[prost(message, tag = "4")]
        TypeUint32(super::EmptyMeta),
        #[prost(message, tag = "5")]
        TypeUint64(super::EmptyMeta),
        #[prost(message, tag = "6")]
        TypeFloat32(super::EmptyMeta),
        #[prost(message, tag = "7")]
        TypeFloat64(super::EmptyMeta),
        #[prost(message, tag = "8")]
        TypeDecimal64(super::DecimalTypeMeta),
        #[prost(message, tag = "9")]
        TypeUtf8(super::EmptyMeta),
        #[prost(message, tag = "10")]
        TypeBinary(super::EmptyMeta),
        #[prost(message, tag = "11")]
        TypeDate(super::EmptyMeta),
        #[prost(message, tag = "12")]
        TypeTimestamp(super::EmptyMeta),
        #[prost(message, tag = "13")]
        TypeInterval(super::EmptyMeta),
        #[prost(message, tag = "14")]
        TypeArray(::prost::alloc::boxed::Box<super::ArrayTypeMeta>),
        #[prost(message, tag = "15")]
        TypeStruct(super::StructTypeMeta),
        #[prost(message, tag = "16")]
        TypeProto(super::NamedTypeMeta),
        #[prost(message, tag = "17")]
        TypeEnum(super::NamedTypeMeta),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArrayValue {
    #[prost(message, optional, tag = "1")]
    pub element_type: ::core::option::Option<DataType>,
    #[prost(message, repeated, tag = "2")]
    pub values: ::prost::alloc::vec::Vec<ScalarValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScalarValue {
    #[prost(
        oneof = "scalar_value::Value",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13"
    )]
    pub value: ::core::option::Option<scalar_value::Value>,
}

/// Nested message and enum types in `ScalarValue`.
pub mod scalar_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        /// A typed null; the payload is the value's type.
        #[prost(message, tag = "1")]
        ValueNull(super::DataType),
        #[prost(bool, tag = "2")]
        ValueBoolean(bool),
        #[prost(int32, tag = "3")]
        ValueInt32(i32),
        #[prost(int64, tag = "4")]
        ValueInt64(i64),
        #[prost(uint32, tag = "5")]
        ValueUint32(u32),
        #[prost(uint64, tag = "6")]
        ValueUint64(u64),
        #[prost(float, tag = "7")]
        ValueFloat32(f32),
        #[prost(double, tag = "8")]
        ValueFloat64(f64),
        #[prost(string, tag = "9")]
        ValueUtf8(::prost::alloc::string::String),
        #[prost(bytes, tag = "10")]
        ValueBinary(::prost::alloc::vec::Vec<u8>),
        #[prost(int32, tag = "11")]
        ValueDate(i32),
        #[prost(int64, tag = "12")]
        ValueTimestamp(i64),
        #[prost(message, tag = "13")]
        ValueArray(super::ArrayValue),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TvfColumn {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub datatype: ::core::option::Option<DataType>,
}

/// Input column schema for a relation argument.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TvfRelation {
    #[prost(message, repeated, tag = "1")]
    pub columns: ::prost::alloc::vec::Vec<TvfColumn>,
}
