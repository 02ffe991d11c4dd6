//! Wire conversions for signatures and their parts.

use squall_error::{OptionExt, Result, SquallError};
use squall_proto::ProtoConv;
use squall_proto::generated::schema;
use squall_proto::generated::signature as wire;
use tracing::debug;

use super::argument::{ArgumentCardinality, FunctionArgumentType, SignatureArgumentKind};
use super::options::{
    FunctionArgumentTypeOptions, FunctionSignatureOptions, ProcedureArgumentMode,
    can_have_default_value,
};
use super::signature::FunctionSignature;
use super::table::{TvfColumn, TvfRelation};
use crate::datatype::DataType;
use crate::scalar::ScalarValue;

fn cardinality_to_proto(cardinality: ArgumentCardinality) -> wire::ArgumentCardinality {
    match cardinality {
        ArgumentCardinality::Required => wire::ArgumentCardinality::Required,
        ArgumentCardinality::Optional => wire::ArgumentCardinality::Optional,
        ArgumentCardinality::Repeated => wire::ArgumentCardinality::Repeated,
    }
}

fn cardinality_from_proto(value: i32) -> Result<ArgumentCardinality> {
    let cardinality = wire::ArgumentCardinality::try_from(value)
        .map_err(|_| SquallError::internal(format!("unknown argument cardinality: {value}")))?;
    Ok(match cardinality {
        wire::ArgumentCardinality::Required => ArgumentCardinality::Required,
        wire::ArgumentCardinality::Optional => ArgumentCardinality::Optional,
        wire::ArgumentCardinality::Repeated => ArgumentCardinality::Repeated,
    })
}

fn procedure_mode_to_proto(mode: ProcedureArgumentMode) -> wire::ProcedureArgumentMode {
    match mode {
        ProcedureArgumentMode::NotSet => wire::ProcedureArgumentMode::NotSet,
        ProcedureArgumentMode::In => wire::ProcedureArgumentMode::In,
        ProcedureArgumentMode::Out => wire::ProcedureArgumentMode::Out,
        ProcedureArgumentMode::InOut => wire::ProcedureArgumentMode::Inout,
    }
}

fn procedure_mode_from_proto(value: i32) -> Result<ProcedureArgumentMode> {
    let mode = wire::ProcedureArgumentMode::try_from(value)
        .map_err(|_| SquallError::internal(format!("unknown procedure argument mode: {value}")))?;
    Ok(match mode {
        wire::ProcedureArgumentMode::NotSet => ProcedureArgumentMode::NotSet,
        wire::ProcedureArgumentMode::In => ProcedureArgumentMode::In,
        wire::ProcedureArgumentMode::Out => ProcedureArgumentMode::Out,
        wire::ProcedureArgumentMode::Inout => ProcedureArgumentMode::InOut,
    })
}

fn kind_to_proto(kind: &SignatureArgumentKind) -> wire::SignatureArgumentKind {
    match kind {
        SignatureArgumentKind::Fixed(_) => wire::SignatureArgumentKind::Fixed,
        SignatureArgumentKind::Any1 => wire::SignatureArgumentKind::Any1,
        SignatureArgumentKind::Any2 => wire::SignatureArgumentKind::Any2,
        SignatureArgumentKind::ArrayAny1 => wire::SignatureArgumentKind::ArrayAny1,
        SignatureArgumentKind::ArrayAny2 => wire::SignatureArgumentKind::ArrayAny2,
        SignatureArgumentKind::MapAny => wire::SignatureArgumentKind::MapAny,
        SignatureArgumentKind::MapKeyAny => wire::SignatureArgumentKind::MapKeyAny,
        SignatureArgumentKind::MapValueAny => wire::SignatureArgumentKind::MapValueAny,
        SignatureArgumentKind::ProtoAny => wire::SignatureArgumentKind::ProtoAny,
        SignatureArgumentKind::StructAny => wire::SignatureArgumentKind::StructAny,
        SignatureArgumentKind::EnumAny => wire::SignatureArgumentKind::EnumAny,
        SignatureArgumentKind::Relation => wire::SignatureArgumentKind::Relation,
        SignatureArgumentKind::Model => wire::SignatureArgumentKind::Model,
        SignatureArgumentKind::Connection => wire::SignatureArgumentKind::Connection,
        SignatureArgumentKind::Descriptor => wire::SignatureArgumentKind::Descriptor,
        SignatureArgumentKind::Arbitrary => wire::SignatureArgumentKind::Arbitrary,
        SignatureArgumentKind::Void => wire::SignatureArgumentKind::Void,
        SignatureArgumentKind::Lambda(_) => wire::SignatureArgumentKind::Lambda,
    }
}

impl ProtoConv for TvfRelation {
    type ProtoType = schema::TvfRelation;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        Ok(schema::TvfRelation {
            columns: self
                .columns()
                .iter()
                .map(|column| {
                    Ok(schema::TvfColumn {
                        name: column.name.clone(),
                        datatype: Some(column.datatype.to_proto()?),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        let columns = proto
            .columns
            .into_iter()
            .map(|column| {
                let datatype = column.datatype.required("relation column type")?;
                Ok(TvfColumn {
                    name: column.name,
                    datatype: DataType::from_proto(datatype)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TvfRelation::new(columns))
    }
}

/// Serialize argument options. `arg_type` is the argument's own concrete
/// type; a default value's type is only written when the argument has none.
fn options_to_proto(
    options: &FunctionArgumentTypeOptions,
    arg_type: Option<&DataType>,
) -> Result<wire::FunctionArgumentTypeOptions> {
    let default_value_type = match (&options.default_value, arg_type) {
        (Some(value), None) => Some(value.datatype().to_proto()?),
        _ => None,
    };

    Ok(wire::FunctionArgumentTypeOptions {
        cardinality: cardinality_to_proto(options.cardinality) as i32,
        must_be_constant: options.must_be_constant,
        must_be_non_null: options.must_be_non_null,
        is_not_aggregate: options.is_not_aggregate,
        must_support_equality: options.must_support_equality,
        must_support_ordering: options.must_support_ordering,
        min_value: options.min_value,
        max_value: options.max_value,
        extra_relation_columns_allowed: options.extra_relation_columns_allowed,
        relation_input_schema: options
            .relation_input_schema
            .as_ref()
            .map(|schema| schema.to_proto())
            .transpose()?,
        argument_name: options.argument_name.clone(),
        argument_name_is_mandatory: options.argument_name_is_mandatory,
        procedure_argument_mode: procedure_mode_to_proto(options.procedure_argument_mode) as i32,
        default_value: options
            .default_value
            .as_ref()
            .map(|value| value.to_proto())
            .transpose()?,
        default_value_type,
        descriptor_table_offset: options.descriptor_table_offset.map(|offset| offset as i64),
    })
}

/// Deserialize argument options. The argument kind drives the default-value
/// contract: kinds that cannot carry defaults reject one outright, and only
/// templated arguments may carry an explicit default value type.
fn options_from_proto(
    proto: wire::FunctionArgumentTypeOptions,
    kind: &SignatureArgumentKind,
) -> Result<FunctionArgumentTypeOptions> {
    let mut options = FunctionArgumentTypeOptions::new(cardinality_from_proto(proto.cardinality)?);
    options.must_be_constant = proto.must_be_constant;
    options.must_be_non_null = proto.must_be_non_null;
    options.is_not_aggregate = proto.is_not_aggregate;
    options.must_support_equality = proto.must_support_equality;
    options.must_support_ordering = proto.must_support_ordering;
    options.min_value = proto.min_value;
    options.max_value = proto.max_value;
    options.extra_relation_columns_allowed = proto.extra_relation_columns_allowed;
    options.relation_input_schema = proto
        .relation_input_schema
        .map(TvfRelation::from_proto)
        .transpose()?;
    options.argument_name = proto.argument_name;
    options.argument_name_is_mandatory = proto.argument_name_is_mandatory;
    options.procedure_argument_mode = procedure_mode_from_proto(proto.procedure_argument_mode)?;
    options.descriptor_table_offset = proto
        .descriptor_table_offset
        .map(|offset| {
            usize::try_from(offset).map_err(|_| {
                SquallError::internal(format!("invalid descriptor table offset: {offset}"))
            })
        })
        .transpose()?;

    if let Some(value_proto) = proto.default_value {
        if !can_have_default_value(kind) {
            return Err(SquallError::new(format!(
                "{} argument cannot have a default value",
                kind.display_name()
            )));
        }
        let value = ScalarValue::from_proto(value_proto)?;

        if let SignatureArgumentKind::Fixed(_) = kind {
            if proto.default_value_type.is_some() {
                return Err(SquallError::internal(
                    "default_value_type can only be set for templated arguments",
                ));
            }
        } else if let Some(type_proto) = proto.default_value_type {
            let declared = DataType::from_proto(type_proto)?;
            if declared != value.datatype() {
                return Err(SquallError::internal(format!(
                    "default value type {declared} does not match the default value {value}"
                )));
            }
        }
        options.default_value = Some(value);
    }

    Ok(options)
}

impl ProtoConv for FunctionArgumentType {
    type ProtoType = wire::FunctionArgumentType;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        let datatype = match self.kind() {
            SignatureArgumentKind::Fixed(t) => Some(t.to_proto()?),
            _ => None,
        };

        let lambda = match self.lambda_signature() {
            Some(lambda) => Some(wire::LambdaSignature {
                arguments: lambda
                    .argument_types()
                    .iter()
                    .map(|arg| arg.to_proto())
                    .collect::<Result<Vec<_>>>()?,
                body: Some(Box::new(lambda.body_type().to_proto()?)),
            }),
            None => None,
        };

        Ok(wire::FunctionArgumentType {
            kind: kind_to_proto(self.kind()) as i32,
            num_occurrences: self
                .num_occurrences()
                .map(|n| n as i64)
                .unwrap_or(-1),
            datatype,
            options: Some(options_to_proto(self.options(), self.concrete_type())?),
            lambda,
        })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        let wire_kind = wire::SignatureArgumentKind::try_from(proto.kind).map_err(|_| {
            SquallError::internal(format!("unknown signature argument kind: {}", proto.kind))
        })?;

        let num_occurrences = match proto.num_occurrences {
            -1 => None,
            n if n >= 0 => Some(n as usize),
            n => {
                return Err(SquallError::internal(format!(
                    "invalid num_occurrences: {n}"
                )));
            }
        };

        // Lambdas rebuild through the validating constructor; their wire
        // options carry no information beyond the plain required preset.
        if wire_kind == wire::SignatureArgumentKind::Lambda {
            let lambda = proto.lambda.required("lambda")?;
            let arguments = lambda
                .arguments
                .into_iter()
                .map(FunctionArgumentType::from_proto)
                .collect::<Result<Vec<_>>>()?;
            let body = FunctionArgumentType::from_proto(*lambda.body.required("lambda body")?)?;
            return FunctionArgumentType::lambda(arguments, body);
        }

        let kind = match wire_kind {
            wire::SignatureArgumentKind::Fixed => {
                let datatype = proto.datatype.required("fixed argument type")?;
                SignatureArgumentKind::Fixed(DataType::from_proto(datatype)?)
            }
            wire::SignatureArgumentKind::Any1 => SignatureArgumentKind::Any1,
            wire::SignatureArgumentKind::Any2 => SignatureArgumentKind::Any2,
            wire::SignatureArgumentKind::ArrayAny1 => SignatureArgumentKind::ArrayAny1,
            wire::SignatureArgumentKind::ArrayAny2 => SignatureArgumentKind::ArrayAny2,
            wire::SignatureArgumentKind::MapAny => SignatureArgumentKind::MapAny,
            wire::SignatureArgumentKind::MapKeyAny => SignatureArgumentKind::MapKeyAny,
            wire::SignatureArgumentKind::MapValueAny => SignatureArgumentKind::MapValueAny,
            wire::SignatureArgumentKind::ProtoAny => SignatureArgumentKind::ProtoAny,
            wire::SignatureArgumentKind::StructAny => SignatureArgumentKind::StructAny,
            wire::SignatureArgumentKind::EnumAny => SignatureArgumentKind::EnumAny,
            wire::SignatureArgumentKind::Relation => SignatureArgumentKind::Relation,
            wire::SignatureArgumentKind::Model => SignatureArgumentKind::Model,
            wire::SignatureArgumentKind::Connection => SignatureArgumentKind::Connection,
            wire::SignatureArgumentKind::Descriptor => SignatureArgumentKind::Descriptor,
            wire::SignatureArgumentKind::Arbitrary => SignatureArgumentKind::Arbitrary,
            wire::SignatureArgumentKind::Void => SignatureArgumentKind::Void,
            wire::SignatureArgumentKind::Lambda => {
                return Err(SquallError::internal("lambda kind without lambda payload"));
            }
        };

        let options = options_from_proto(proto.options.unwrap_or_default(), &kind)?;
        let mut argument = FunctionArgumentType::with_options(kind, options);
        if let Some(n) = num_occurrences {
            argument = argument.with_num_occurrences(n);
        }
        Ok(argument)
    }
}

impl ProtoConv for FunctionSignatureOptions {
    type ProtoType = wire::FunctionSignatureOptions;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        Ok(wire::FunctionSignatureOptions {
            is_deprecated: self.is_deprecated,
            additional_deprecation_warning: self.additional_deprecation_warnings.clone(),
            required_feature: self.required_features.clone(),
            is_aliased_signature: self.is_aliased_signature,
        })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        Ok(FunctionSignatureOptions {
            is_deprecated: proto.is_deprecated,
            additional_deprecation_warnings: proto.additional_deprecation_warning,
            required_features: proto.required_feature,
            is_aliased_signature: proto.is_aliased_signature,
        })
    }
}

impl ProtoConv for FunctionSignature {
    type ProtoType = wire::FunctionSignature;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        Ok(wire::FunctionSignature {
            return_type: Some(self.result_type().to_proto()?),
            arguments: self
                .arguments()
                .iter()
                .map(|arg| arg.to_proto())
                .collect::<Result<Vec<_>>>()?,
            options: Some(self.options().to_proto()?),
            context_id: self.context_id(),
        })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        let arguments = proto
            .arguments
            .into_iter()
            .map(FunctionArgumentType::from_proto)
            .collect::<Result<Vec<_>>>()?;
        let result_type =
            FunctionArgumentType::from_proto(proto.return_type.required("return type")?)?;
        let options = match proto.options {
            Some(options) => FunctionSignatureOptions::from_proto(options)?,
            None => FunctionSignatureOptions::default(),
        };

        let signature =
            FunctionSignature::with_options(result_type, arguments, proto.context_id, options);
        signature.is_valid()?;

        debug!(
            context_id = signature.context_id(),
            num_arguments = signature.arguments().len(),
            "deserialized function signature"
        );
        Ok(signature)
    }
}
