//! Constraint options attached to arguments and signatures.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::argument::{ArgumentCardinality, SignatureArgumentKind};
use super::table::TvfRelation;
use crate::scalar::ScalarValue;

/// Argument passing mode for procedure arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProcedureArgumentMode {
    #[default]
    NotSet,
    In,
    Out,
    InOut,
}

impl ProcedureArgumentMode {
    pub const fn name(&self) -> &'static str {
        match self {
            ProcedureArgumentMode::NotSet => "NOT_SET",
            ProcedureArgumentMode::In => "IN",
            ProcedureArgumentMode::Out => "OUT",
            ProcedureArgumentMode::InOut => "INOUT",
        }
    }
}

impl fmt::Display for ProcedureArgumentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Return if arguments of the given kind can carry a default value.
///
/// True for ordinary expression-valued kinds, false for the others
/// (relation, model, connection, descriptor, void, lambda). This is the
/// single source of truth, consulted both when validating an argument and
/// when deserializing one from the wire.
pub fn can_have_default_value(kind: &SignatureArgumentKind) -> bool {
    use SignatureArgumentKind::*;
    match kind {
        Fixed(_) | Any1 | Any2 | ArrayAny1 | ArrayAny2 | MapAny | MapKeyAny | MapValueAny
        | ProtoAny | StructAny | EnumAny | Arbitrary => true,
        Relation | Model | Connection | Descriptor | Void | Lambda(_) => false,
    }
}

/// Constraints attached to a single argument type.
///
/// The cardinality lives here so the common "plain required/optional/
/// repeated" argument shapes can share one options instance; see
/// [`FunctionArgumentTypeOptions::simple`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgumentTypeOptions {
    pub cardinality: ArgumentCardinality,
    pub must_be_constant: bool,
    pub must_be_non_null: bool,
    pub is_not_aggregate: bool,
    pub must_support_equality: bool,
    pub must_support_ordering: bool,
    /// Inclusive bounds for fixed-range integer arguments.
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    /// Only meaningful when the argument kind is `Relation`.
    pub extra_relation_columns_allowed: bool,
    pub relation_input_schema: Option<TvfRelation>,
    pub argument_name: Option<String>,
    pub argument_name_is_mandatory: bool,
    pub procedure_argument_mode: ProcedureArgumentMode,
    pub default_value: Option<ScalarValue>,
    /// Index of the relation argument a descriptor argument resolves its
    /// column names against.
    pub descriptor_table_offset: Option<usize>,
}

/// Shared instances for the three plain cardinalities.
static SIMPLE_REQUIRED: Lazy<Arc<FunctionArgumentTypeOptions>> = Lazy::new(|| {
    Arc::new(FunctionArgumentTypeOptions::new(
        ArgumentCardinality::Required,
    ))
});
static SIMPLE_OPTIONAL: Lazy<Arc<FunctionArgumentTypeOptions>> = Lazy::new(|| {
    Arc::new(FunctionArgumentTypeOptions::new(
        ArgumentCardinality::Optional,
    ))
});
static SIMPLE_REPEATED: Lazy<Arc<FunctionArgumentTypeOptions>> = Lazy::new(|| {
    Arc::new(FunctionArgumentTypeOptions::new(
        ArgumentCardinality::Repeated,
    ))
});

impl FunctionArgumentTypeOptions {
    pub fn new(cardinality: ArgumentCardinality) -> Self {
        FunctionArgumentTypeOptions {
            cardinality,
            must_be_constant: false,
            must_be_non_null: false,
            is_not_aggregate: false,
            must_support_equality: false,
            must_support_ordering: false,
            min_value: None,
            max_value: None,
            extra_relation_columns_allowed: true,
            relation_input_schema: None,
            argument_name: None,
            argument_name_is_mandatory: false,
            procedure_argument_mode: ProcedureArgumentMode::NotSet,
            default_value: None,
            descriptor_table_offset: None,
        }
    }

    /// Get the shared options instance for a plain cardinality with no other
    /// constraints set.
    pub fn simple(cardinality: ArgumentCardinality) -> Arc<Self> {
        match cardinality {
            ArgumentCardinality::Required => SIMPLE_REQUIRED.clone(),
            ArgumentCardinality::Optional => SIMPLE_OPTIONAL.clone(),
            ArgumentCardinality::Repeated => SIMPLE_REPEATED.clone(),
        }
    }

    pub fn with_must_be_constant(mut self) -> Self {
        self.must_be_constant = true;
        self
    }

    pub fn with_must_be_non_null(mut self) -> Self {
        self.must_be_non_null = true;
        self
    }

    pub fn with_not_aggregate(mut self) -> Self {
        self.is_not_aggregate = true;
        self
    }

    pub fn with_must_support_equality(mut self) -> Self {
        self.must_support_equality = true;
        self
    }

    pub fn with_must_support_ordering(mut self) -> Self {
        self.must_support_ordering = true;
        self
    }

    pub fn with_range(mut self, min_value: i64, max_value: i64) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    pub fn with_relation_input_schema(
        mut self,
        schema: TvfRelation,
        extra_columns_allowed: bool,
    ) -> Self {
        self.relation_input_schema = Some(schema);
        self.extra_relation_columns_allowed = extra_columns_allowed;
        self
    }

    pub fn with_argument_name(mut self, name: impl Into<String>) -> Self {
        self.argument_name = Some(name.into());
        self
    }

    pub fn with_mandatory_argument_name(mut self, name: impl Into<String>) -> Self {
        self.argument_name = Some(name.into());
        self.argument_name_is_mandatory = true;
        self
    }

    pub fn with_procedure_argument_mode(mut self, mode: ProcedureArgumentMode) -> Self {
        self.procedure_argument_mode = mode;
        self
    }

    pub fn with_default(mut self, value: ScalarValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_descriptor_table_offset(mut self, offset: usize) -> Self {
        self.descriptor_table_offset = Some(offset);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Options rendered for debug strings, e.g.
    /// ` {must_be_constant: true, default_value: 1}`.
    ///
    /// Empty if no renderable option is set.
    pub fn options_debug_string(&self) -> String {
        let mut options = Vec::new();
        if self.must_be_constant {
            options.push("must_be_constant: true".to_string());
        }
        if self.must_be_non_null {
            options.push("must_be_non_null: true".to_string());
        }
        if let Some(default) = &self.default_value {
            options.push(format!("default_value: {default}"));
        }
        if self.is_not_aggregate {
            options.push("is_not_aggregate: true".to_string());
        }
        if self.procedure_argument_mode != ProcedureArgumentMode::NotSet {
            options.push(format!(
                "procedure_argument_mode: {}",
                self.procedure_argument_mode
            ));
        }
        if options.is_empty() {
            String::new()
        } else {
            format!(" {{{}}}", options.join(", "))
        }
    }

    /// Options rendered for SQL declarations. Constraints without SQL surface
    /// syntax are emitted as comments.
    pub fn sql_declaration(&self) -> String {
        let mut options = Vec::new();
        if self.must_be_constant {
            options.push("/*must_be_constant*/".to_string());
        }
        if self.must_be_non_null {
            options.push("/*must_be_non_null*/".to_string());
        }
        if let Some(default) = &self.default_value {
            options.push("DEFAULT".to_string());
            options.push(default.sql_literal());
        }
        if self.is_not_aggregate {
            options.push("NOT AGGREGATE".to_string());
        }
        if options.is_empty() {
            String::new()
        } else {
            format!(" {}", options.join(" "))
        }
    }
}

impl Default for FunctionArgumentTypeOptions {
    fn default() -> Self {
        FunctionArgumentTypeOptions::new(ArgumentCardinality::Required)
    }
}

/// Signature-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignatureOptions {
    pub is_deprecated: bool,
    pub additional_deprecation_warnings: Vec<String>,
    /// Names of language features that must be enabled for this signature to
    /// be visible.
    pub required_features: Vec<String>,
    /// Set when this signature duplicates another one under an alias.
    pub is_aliased_signature: bool,
}

impl FunctionSignatureOptions {
    pub fn new() -> Self {
        FunctionSignatureOptions::default()
    }

    pub fn with_deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    pub fn with_deprecation_warning(mut self, warning: impl Into<String>) -> Self {
        self.additional_deprecation_warnings.push(warning.into());
        self
    }

    pub fn with_required_feature(mut self, feature: impl Into<String>) -> Self {
        self.required_features.push(feature.into());
        self
    }

    pub fn with_aliased_signature(mut self) -> Self {
        self.is_aliased_signature = true;
        self
    }
}
