//! Argument kinds, cardinalities, and argument types.

use std::fmt;
use std::mem;
use std::sync::Arc;

use squall_error::{Result, SquallError};

use super::options::{FunctionArgumentTypeOptions, can_have_default_value};
use crate::datatype::DataType;

/// How many times an argument position may occur in a concrete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentCardinality {
    Required,
    Optional,
    Repeated,
}

impl ArgumentCardinality {
    pub const fn name(&self) -> &'static str {
        match self {
            ArgumentCardinality::Required => "REQUIRED",
            ArgumentCardinality::Optional => "OPTIONAL",
            ArgumentCardinality::Repeated => "REPEATED",
        }
    }
}

impl fmt::Display for ArgumentCardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The declared kind of an argument or result type.
///
/// `Fixed` carries the concrete type. The `Any1`/`Any2` family are template
/// placeholders that bind to concrete types during overload matching.
/// `Lambda` carries its own nested signature fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureArgumentKind {
    /// A concrete type.
    Fixed(DataType),
    Any1,
    Any2,
    /// An array whose element type binds the same template as `Any1`.
    ArrayAny1,
    ArrayAny2,
    /// A proto map; its key and value types bind `MapKeyAny`/`MapValueAny`.
    MapAny,
    MapKeyAny,
    MapValueAny,
    /// Any proto message type.
    ProtoAny,
    /// Any struct type.
    StructAny,
    /// Any proto enum type.
    EnumAny,
    /// A relation (table-valued functions only).
    Relation,
    Model,
    Connection,
    /// Column names resolved against a relation argument in the same call.
    Descriptor,
    /// Accepts a value of any type without templating.
    Arbitrary,
    Void,
    /// A function-typed argument with its own argument list and body type.
    Lambda(LambdaSignature),
}

impl SignatureArgumentKind {
    /// Short name used in debug strings and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            SignatureArgumentKind::Fixed(_) => "FIXED",
            SignatureArgumentKind::Any1 => "<T1>",
            SignatureArgumentKind::Any2 => "<T2>",
            SignatureArgumentKind::ArrayAny1 => "<array<T1>>",
            SignatureArgumentKind::ArrayAny2 => "<array<T2>>",
            SignatureArgumentKind::MapAny => "<map<K, V>>",
            SignatureArgumentKind::MapKeyAny => "<K>",
            SignatureArgumentKind::MapValueAny => "<V>",
            SignatureArgumentKind::ProtoAny => "<proto>",
            SignatureArgumentKind::StructAny => "<struct>",
            SignatureArgumentKind::EnumAny => "<enum>",
            SignatureArgumentKind::Relation => "ANY TABLE",
            SignatureArgumentKind::Model => "ANY MODEL",
            SignatureArgumentKind::Connection => "ANY CONNECTION",
            SignatureArgumentKind::Descriptor => "ANY DESCRIPTOR",
            SignatureArgumentKind::Arbitrary => "<arbitrary>",
            SignatureArgumentKind::Void => "<void>",
            SignatureArgumentKind::Lambda(_) => "ANY LAMBDA",
        }
    }

    /// Return if `self` and `other` are the same kind, ignoring any carried
    /// payload (the fixed type, the lambda fragment).
    pub fn same_kind(&self, other: &SignatureArgumentKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// The nested signature fragment of a lambda argument.
///
/// Owned exclusively by its containing [`FunctionArgumentType`]; construction
/// goes through [`FunctionArgumentType::lambda`] so the nested types are
/// always of the restricted shapes lambdas support.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaSignature {
    argument_types: Vec<FunctionArgumentType>,
    body_type: Box<FunctionArgumentType>,
}

impl LambdaSignature {
    pub fn argument_types(&self) -> &[FunctionArgumentType] {
        &self.argument_types
    }

    pub fn body_type(&self) -> &FunctionArgumentType {
        &self.body_type
    }
}

/// One argument or result type of a signature.
///
/// `num_occurrences` is `None` for an uninstantiated signature-level
/// argument, and the bound occurrence count once an external resolver has
/// matched the signature against a call site (0 for an omitted optional
/// argument, N for a repeated argument occurring N times).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgumentType {
    kind: SignatureArgumentKind,
    options: Arc<FunctionArgumentTypeOptions>,
    num_occurrences: Option<usize>,
}

impl FunctionArgumentType {
    pub fn new(kind: SignatureArgumentKind, cardinality: ArgumentCardinality) -> Self {
        FunctionArgumentType {
            kind,
            options: FunctionArgumentTypeOptions::simple(cardinality),
            num_occurrences: None,
        }
    }

    pub fn with_options(kind: SignatureArgumentKind, options: FunctionArgumentTypeOptions) -> Self {
        FunctionArgumentType {
            kind,
            options: Arc::new(options),
            num_occurrences: None,
        }
    }

    /// A required argument of a concrete type.
    pub fn fixed(datatype: DataType) -> Self {
        Self::new(
            SignatureArgumentKind::Fixed(datatype),
            ArgumentCardinality::Required,
        )
    }

    /// Bind the argument to a concrete occurrence count.
    pub fn with_num_occurrences(mut self, num_occurrences: usize) -> Self {
        self.num_occurrences = Some(num_occurrences);
        self
    }

    /// Build a lambda argument type from its nested argument types and body
    /// type.
    ///
    /// Lambdas intentionally support only the minimal argument shape needed
    /// by expressions like array element transforms: every nested type must
    /// be `Fixed`/`Any1`/`Any2`/`ArrayAny1`/`ArrayAny2` with plain required
    /// options. Anything else is an internal error.
    pub fn lambda(
        argument_types: Vec<FunctionArgumentType>,
        body_type: FunctionArgumentType,
    ) -> Result<Self> {
        for arg in &argument_types {
            Self::check_lambda_arg_type(arg)?;
        }
        Self::check_lambda_arg_type(&body_type)?;

        Ok(FunctionArgumentType {
            kind: SignatureArgumentKind::Lambda(LambdaSignature {
                argument_types,
                body_type: Box::new(body_type),
            }),
            options: FunctionArgumentTypeOptions::simple(ArgumentCardinality::Required),
            num_occurrences: Some(1),
        })
    }

    fn check_lambda_arg_type(arg: &FunctionArgumentType) -> Result<()> {
        use SignatureArgumentKind::*;
        if !matches!(arg.kind, Fixed(_) | Any1 | Any2 | ArrayAny1 | ArrayAny2) {
            return Err(SquallError::internal(format!(
                "argument kind not supported by lambda: {}",
                arg.debug_string(true)
            )));
        }
        let simple = FunctionArgumentTypeOptions::simple(ArgumentCardinality::Required);
        if *arg.options != *simple {
            return Err(SquallError::internal(format!(
                "only plain REQUIRED options are supported by lambda argument types: {}",
                arg.debug_string(true)
            )));
        }
        Ok(())
    }

    pub fn kind(&self) -> &SignatureArgumentKind {
        &self.kind
    }

    pub fn options(&self) -> &FunctionArgumentTypeOptions {
        &self.options
    }

    pub fn num_occurrences(&self) -> Option<usize> {
        self.num_occurrences
    }

    pub fn cardinality(&self) -> ArgumentCardinality {
        self.options.cardinality
    }

    pub fn is_required(&self) -> bool {
        self.cardinality() == ArgumentCardinality::Required
    }

    pub fn is_optional(&self) -> bool {
        self.cardinality() == ArgumentCardinality::Optional
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality() == ArgumentCardinality::Repeated
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Fixed(_))
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Relation)
    }

    /// A relation argument bound to an explicit input column schema.
    pub fn is_fixed_relation(&self) -> bool {
        self.is_relation() && self.options.relation_input_schema.is_some()
    }

    pub fn is_descriptor(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Descriptor)
    }

    pub fn is_arbitrary(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Arbitrary)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Void)
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.kind, SignatureArgumentKind::Lambda(_))
    }

    pub fn lambda_signature(&self) -> Option<&LambdaSignature> {
        match &self.kind {
            SignatureArgumentKind::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }

    /// The argument's concrete type: the fixed type, or for lambdas the body
    /// type's concrete type. `None` for templated kinds.
    pub fn concrete_type(&self) -> Option<&DataType> {
        match &self.kind {
            SignatureArgumentKind::Fixed(t) => Some(t),
            SignatureArgumentKind::Lambda(lambda) => lambda.body_type().concrete_type(),
            _ => None,
        }
    }

    pub fn argument_name(&self) -> Option<&str> {
        self.options.argument_name.as_deref()
    }

    /// An argument is concrete once its kind denotes an actual runtime shape
    /// and it has been bound to an occurrence count. Lambdas additionally
    /// require all nested types to be concrete.
    pub fn is_concrete(&self) -> bool {
        use SignatureArgumentKind::*;
        if !matches!(self.kind, Fixed(_) | Relation | Model | Connection | Lambda(_)) {
            return false;
        }
        if self.num_occurrences.is_none() {
            return false;
        }
        if let Lambda(lambda) = &self.kind {
            return lambda.argument_types().iter().all(|a| a.is_concrete())
                && lambda.body_type().is_concrete();
        }
        true
    }

    /// An argument is templated if its final type depends on the call site:
    /// it is not fixed, not a schema-bound relation, and not void. A lambda
    /// is templated if any nested type is.
    pub fn is_templated(&self) -> bool {
        use SignatureArgumentKind::*;
        match &self.kind {
            Lambda(lambda) => {
                lambda.argument_types().iter().any(|a| a.is_templated())
                    || lambda.body_type().is_templated()
            }
            Fixed(_) | Void => false,
            Relation => !self.is_fixed_relation(),
            _ => true,
        }
    }

    /// Return if this templated argument must bind the same underlying type
    /// as the given kind during overload matching.
    ///
    /// A kind is related to itself; `ArrayAnyK` is related to `AnyK`;
    /// `MapAny` is related to its key and value kinds; a lambda's relation is
    /// the union of its nested types' relations.
    pub fn templated_kind_is_related(&self, kind: &SignatureArgumentKind) -> bool {
        use SignatureArgumentKind::*;

        if !self.is_templated() {
            return false;
        }
        if self.kind.same_kind(kind) {
            return true;
        }

        if let Lambda(lambda) = &self.kind {
            return lambda
                .argument_types()
                .iter()
                .any(|a| a.templated_kind_is_related(kind))
                || lambda.body_type().templated_kind_is_related(kind);
        }

        matches!(
            (&self.kind, kind),
            (ArrayAny1, Any1)
                | (Any1, ArrayAny1)
                | (ArrayAny2, Any2)
                | (Any2, ArrayAny2)
                | (MapAny, MapKeyAny)
                | (MapKeyAny, MapAny)
                | (MapAny, MapValueAny)
                | (MapValueAny, MapAny)
        )
    }

    /// Validate this argument type in isolation.
    pub fn is_valid(&self) -> Result<()> {
        match self.cardinality() {
            ArgumentCardinality::Repeated => {
                // Any bound occurrence count is fine for a repeated argument,
                // including zero.
                if self.options.has_default() {
                    return Err(SquallError::new(format!(
                        "Default value cannot be applied to a REPEATED argument: {self}"
                    )));
                }
            }
            ArgumentCardinality::Optional => {
                if self.is_concrete()
                    && let Some(n) = self.num_occurrences
                    && n > 1
                {
                    return Err(SquallError::new(format!(
                        "OPTIONAL concrete argument has {n} occurrences but must have 0 or 1: {self}"
                    )));
                }
                if let Some(default) = &self.options.default_value {
                    if !can_have_default_value(&self.kind) {
                        return Err(SquallError::new(format!(
                            "{} argument cannot have a default value: {self}",
                            self.kind.display_name()
                        )));
                    }
                    if let Some(typ) = self.concrete_type()
                        && default.datatype() != *typ
                    {
                        return Err(SquallError::new(format!(
                            "Default value type does not match the argument type: {self}"
                        )));
                    }
                }
            }
            ArgumentCardinality::Required => {
                if self.is_concrete() && self.num_occurrences != Some(1) {
                    return Err(SquallError::new(format!(
                        "REQUIRED concrete argument has {} occurrences but must have exactly 1: {self}",
                        self.num_occurrences.unwrap_or_default()
                    )));
                }
                if self.options.has_default() {
                    return Err(SquallError::new(format!(
                        "Default value cannot be applied to a REQUIRED argument: {self}"
                    )));
                }
            }
        }

        if let SignatureArgumentKind::Lambda(lambda) = &self.kind {
            if !self.is_required() {
                return Err(SquallError::internal(format!(
                    "lambda argument must have REQUIRED cardinality: {self}"
                )));
            }
            for arg in lambda.argument_types() {
                Self::check_lambda_arg_type(arg)?;
            }
            Self::check_lambda_arg_type(lambda.body_type())?;
        }

        Ok(())
    }

    /// Diagnostic rendering with cardinality and occurrence annotations.
    /// `verbose` appends the options.
    pub fn debug_string(&self, verbose: bool) -> String {
        let cardinality = match self.cardinality() {
            ArgumentCardinality::Repeated => "repeated",
            ArgumentCardinality::Optional => "optional",
            ArgumentCardinality::Required => "",
        };
        let occurrences = if self.is_concrete() && !self.is_required() {
            format!("({})", self.num_occurrences.unwrap_or_default())
        } else {
            String::new()
        };

        let mut result = format!("{cardinality}{occurrences}");
        if !self.is_required() {
            result.push(' ');
        }

        match &self.kind {
            SignatureArgumentKind::Lambda(lambda) => {
                let args = lambda
                    .argument_types()
                    .iter()
                    .map(|a| a.debug_string(verbose))
                    .collect::<Vec<_>>()
                    .join(", ");
                result.push_str(&format!(
                    "LAMBDA({})->{}",
                    args,
                    lambda.body_type().debug_string(false)
                ));
            }
            SignatureArgumentKind::Fixed(t) => result.push_str(&t.to_string()),
            SignatureArgumentKind::Relation if self.options.relation_input_schema.is_some() => {
                result = self
                    .options
                    .relation_input_schema
                    .as_ref()
                    .map(|schema| schema.to_string())
                    .unwrap_or_default();
            }
            SignatureArgumentKind::Arbitrary => result.push_str("ANY TYPE"),
            other => result.push_str(other.display_name()),
        }

        if verbose {
            result.push_str(&self.options.options_debug_string());
        }
        if let Some(name) = &self.options.argument_name {
            result.push(' ');
            result.push_str(name);
        }
        result
    }

    /// SQL declaration form. Constraints without SQL surface syntax are
    /// emitted as comments.
    pub fn sql_declaration(&self) -> String {
        if let SignatureArgumentKind::Lambda(lambda) = &self.kind {
            let args = lambda
                .argument_types()
                .iter()
                .map(|a| a.sql_declaration())
                .collect::<Vec<_>>()
                .join(", ");
            return format!(
                "LAMBDA(({})->{})",
                args,
                lambda.body_type().sql_declaration()
            );
        }

        let cardinality = match self.cardinality() {
            ArgumentCardinality::Repeated => "/*repeated*/",
            ArgumentCardinality::Optional => "/*optional*/",
            ArgumentCardinality::Required => "",
        };
        let mut result = String::from(cardinality);
        if !self.is_required() {
            result.push(' ');
        }

        match &self.kind {
            SignatureArgumentKind::Fixed(t) => result.push_str(&t.sql_name()),
            SignatureArgumentKind::Relation if self.options.relation_input_schema.is_some() => {
                if let Some(schema) = &self.options.relation_input_schema {
                    result.push_str(&schema.sql_declaration());
                }
            }
            SignatureArgumentKind::Arbitrary => result.push_str("ANY TYPE"),
            other => result.push_str(other.display_name()),
        }

        result.push_str(&self.options.sql_declaration());
        result
    }

    /// Name shown to users in error messages, e.g. unmatched-signature lists.
    pub fn user_facing_name(&self) -> String {
        use SignatureArgumentKind::*;
        match &self.kind {
            Fixed(t) => t.sql_name(),
            ArrayAny1 | ArrayAny2 => "ARRAY".to_string(),
            ProtoAny => "PROTO".to_string(),
            StructAny => "STRUCT".to_string(),
            EnumAny => "ENUM".to_string(),
            MapAny => "PROTO_MAP".to_string(),
            MapKeyAny | MapValueAny | Any1 | Any2 | Arbitrary => "ANY".to_string(),
            Relation => "TABLE".to_string(),
            Model => "MODEL".to_string(),
            Connection => "CONNECTION".to_string(),
            Descriptor => "DESCRIPTOR".to_string(),
            Void => "VOID".to_string(),
            Lambda(_) => "LAMBDA".to_string(),
        }
    }

    /// User-facing name wrapped in the cardinality notation used when listing
    /// signatures, e.g. `[INT64, ...]` for a repeated argument.
    pub fn user_facing_name_with_cardinality(&self) -> String {
        let mut name = self.user_facing_name();
        if self.options.argument_name_is_mandatory
            && let Some(arg_name) = &self.options.argument_name
        {
            name = format!("{arg_name} => {name}");
        }
        match self.cardinality() {
            ArgumentCardinality::Optional => format!("[{name}]"),
            ArgumentCardinality::Repeated => format!("[{name}, ...]"),
            ArgumentCardinality::Required => name,
        }
    }
}

impl fmt::Display for FunctionArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_string(false))
    }
}
