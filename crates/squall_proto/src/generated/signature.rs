//! Function signature messages.

use super::schema::{DataType, ScalarValue, TvfRelation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SignatureArgumentKind {
    Fixed = 0,
    Any1 = 1,
    Any2 = 2,
    ArrayAny1 = 3,
    ArrayAny2 = 4,
    MapAny = 5,
    MapKeyAny = 6,
    MapValueAny = 7,
    ProtoAny = 8,
    StructAny = 9,
    EnumAny = 10,
    Relation = 11,
    Model = 12,
    Connection = 13,
    Descriptor = 14,
    Arbitrary = 15,
    Void = 16,
    Lambda = 17,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ArgumentCardinality {
    Required = 0,
    Optional = 1,
    Repeated = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProcedureArgumentMode {
    NotSet = 0,
    In = 1,
    Out = 2,
    Inout = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FunctionArgumentTypeOptions {
    #[prost(enumeration = "ArgumentCardinality", tag = "1")]
    pub cardinality: i32,
    #[prost(bool, tag = "2")]
    pub must_be_constant: bool,
    #[prost(bool, tag = "3")]
    pub must_be_non_null: bool,
    #[prost(bool, tag = "4")]
    pub is_not_aggregate: bool,
    #[prost(bool, tag = "5")]
    pub must_support_equality: bool,
    #[prost(bool, tag = "6")]
    pub must_support_ordering: bool,
    #[prost(int64, optional, tag = "7")]
    pub min_value: ::core::option::Option<i64>,
    #[prost(int64, optional, tag = "8")]
    pub max_value: ::core::option::Option<i64>,
    #[prost(bool, tag = "9")]
    pub extra_relation_columns_allowed: bool,
    #[prost(message, optional, tag = "10")]
    pub relation_input_schema: ::core::option::Option<TvfRelation>,
    #[prost(string, optional, tag = "11")]
    pub argument_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, tag = "12")]
    pub argument_name_is_mandatory: bool,
    #[prost(enumeration = "ProcedureArgumentMode", tag = "13")]
    pub procedure_argument_mode: i32,
    #[prost(message, optional, tag = "14")]
    pub default_value: ::core::option::Option<ScalarValue>,
    /// Type of the default value. Only set for templated arguments; a fixed
    /// argument's default takes its type from the argument itself.
    #[prost(message, optional, tag = "15")]
    pub default_value_type: ::core::option::Option<DataType>,
    #[prost(int64, optional, tag = "16")]
    pub descriptor_table_offset: ::core::option::Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LambdaSignature {
    #[prost(message, repeated, tag = "1")]
    pub arguments: ::prost::alloc::vec::Vec<FunctionArgumentType>,
    #[prost(message, optional, boxed, tag = "2")]
    pub body: ::core::option::Option<::prost::alloc::boxed::Box<FunctionArgumentType>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FunctionArgumentType {
    #[prost(enumeration = "SignatureArgumentKind", tag = "1")]
    pub kind: i32,
    /// Occurrence count once bound to a concrete call; -1 when the argument
    /// is uninstantiated.
    #[prost(int64, tag = "2")]
    pub num_occurrences: i64,
    /// Only set when `kind` is `Fixed`.
    #[prost(message, optional, tag = "3")]
    pub datatype: ::core::option::Option<DataType>,
    #[prost(message, optional, tag = "4")]
    pub options: ::core::option::Option<FunctionArgumentTypeOptions>,
    /// Only set when `kind` is `Lambda`.
    #[prost(message, optional, tag = "5")]
    pub lambda: ::core::option::Option<LambdaSignature>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FunctionSignatureOptions {
    #[prost(bool, tag = "1")]
    pub is_deprecated: bool,
    #[prost(string, repeated, tag = "2")]
    pub additional_deprecation_warning: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "3")]
    pub required_feature: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, tag = "4")]
    pub is_aliased_signature: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FunctionSignature {
    #[prost(message, optional, tag = "1")]
    pub return_type: ::core::option::Option<FunctionArgumentType>,
    #[prost(message, repeated, tag = "2")]
    pub arguments: ::prost::alloc::vec::Vec<FunctionArgumentType>,
    #[prost(message, optional, tag = "3")]
    pub options: ::core::option::Option<FunctionSignatureOptions>,
    #[prost(int64, tag = "4")]
    pub context_id: i64,
}
