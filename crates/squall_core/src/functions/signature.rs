//! Function signatures and their structural invariants.

use std::fmt;

use squall_error::{Result, SquallError};

use super::argument::FunctionArgumentType;
use super::options::{FunctionSignatureOptions, ProcedureArgumentMode};
use crate::datatype::DataType;

/// The declared shape of one overload of a function, procedure, or
/// table-valued function.
///
/// Derived fields (argument counts, the concrete-argument expansion) are
/// computed once at construction; a signature is immutable afterwards except
/// for [`FunctionSignature::set_concrete_result_type`].
///
/// Construction itself never fails so invalid signatures can be built and
/// inspected; callers accepting signatures from a catalog author or the wire
/// run [`FunctionSignature::is_valid`] (or a context-specific variant) and
/// reject failures.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    arguments: Vec<FunctionArgumentType>,
    result_type: FunctionArgumentType,
    context_id: i64,
    options: FunctionSignatureOptions,
    num_repeated_arguments: usize,
    num_optional_arguments: usize,
    is_concrete: bool,
    concrete_arguments: Vec<FunctionArgumentType>,
}

impl FunctionSignature {
    pub fn new(
        result_type: FunctionArgumentType,
        arguments: Vec<FunctionArgumentType>,
        context_id: i64,
    ) -> Self {
        Self::with_options(
            result_type,
            arguments,
            context_id,
            FunctionSignatureOptions::default(),
        )
    }

    pub fn with_options(
        result_type: FunctionArgumentType,
        arguments: Vec<FunctionArgumentType>,
        context_id: i64,
        options: FunctionSignatureOptions,
    ) -> Self {
        let mut signature = FunctionSignature {
            arguments,
            result_type,
            context_id,
            options,
            num_repeated_arguments: 0,
            num_optional_arguments: 0,
            is_concrete: false,
            concrete_arguments: Vec::new(),
        };
        signature.num_repeated_arguments = signature.compute_num_repeated_arguments();
        signature.num_optional_arguments = signature.compute_num_optional_arguments();
        signature.is_concrete = signature.compute_is_concrete();
        signature.concrete_arguments = signature.compute_concrete_argument_types();
        signature
    }

    pub fn arguments(&self) -> &[FunctionArgumentType] {
        &self.arguments
    }

    pub fn result_type(&self) -> &FunctionArgumentType {
        &self.result_type
    }

    pub fn context_id(&self) -> i64 {
        self.context_id
    }

    pub fn options(&self) -> &FunctionSignatureOptions {
        &self.options
    }

    pub fn is_concrete(&self) -> bool {
        self.is_concrete
    }

    /// The flat, ordered list of argument types present in one concrete
    /// call. Empty unless the signature has concrete arguments.
    pub fn concrete_arguments(&self) -> &[FunctionArgumentType] {
        &self.concrete_arguments
    }

    pub fn num_repeated_arguments(&self) -> usize {
        self.num_repeated_arguments
    }

    pub fn num_optional_arguments(&self) -> usize {
        self.num_optional_arguments
    }

    pub fn num_required_arguments(&self) -> usize {
        self.arguments.len() - self.num_repeated_arguments - self.num_optional_arguments
    }

    fn first_repeated_argument_index(&self) -> Option<usize> {
        self.arguments.iter().position(|arg| arg.is_repeated())
    }

    fn last_repeated_argument_index(&self) -> Option<usize> {
        self.arguments.iter().rposition(|arg| arg.is_repeated())
    }

    fn compute_num_repeated_arguments(&self) -> usize {
        match (
            self.first_repeated_argument_index(),
            self.last_repeated_argument_index(),
        ) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    fn compute_num_optional_arguments(&self) -> usize {
        self.arguments
            .iter()
            .rev()
            .take_while(|arg| arg.is_optional())
            .count()
    }

    /// Return if every argument bound to at least one occurrence is concrete.
    ///
    /// Omitted templated arguments (zero occurrences) don't prevent the bound
    /// part of the signature from being treated as concrete.
    pub fn has_concrete_arguments(&self) -> bool {
        if self.is_concrete {
            return true;
        }
        self.arguments.iter().all(|arg| {
            !matches!(arg.num_occurrences(), Some(n) if n > 0) || arg.is_concrete()
        })
    }

    fn compute_is_concrete(&self) -> bool {
        if !self.has_concrete_arguments() {
            return false;
        }
        if self.result_type.is_relation() {
            // A TVF result is always relation-shaped; the signature is
            // concrete once the arguments are.
            return true;
        }
        self.result_type.is_concrete()
    }

    /// Expand the bound arguments into the flat list present in one call.
    ///
    /// Arguments outside the repeated block are emitted once each when
    /// present. The repeated block is emitted by repeating the whole block
    /// once per repetition, preserving declared order within each repetition,
    /// which models variadic constructs where several repeated positions
    /// advance together (multi-key `IN`, map constructors).
    fn compute_concrete_argument_types(&self) -> Vec<FunctionArgumentType> {
        if !self.has_concrete_arguments() {
            return Vec::new();
        }

        let (first_repeated, last_repeated) = match (
            self.first_repeated_argument_index(),
            self.last_repeated_argument_index(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                // No repeated block; emit present arguments in order.
                return self
                    .arguments
                    .iter()
                    .filter(|arg| arg.num_occurrences() == Some(1))
                    .cloned()
                    .collect();
            }
        };

        let mut concrete = Vec::new();

        for arg in &self.arguments[..first_repeated] {
            if arg.num_occurrences() == Some(1) {
                concrete.push(arg.clone());
            }
        }

        // All repeated arguments share one occurrence count.
        let repetitions = self.arguments[first_repeated]
            .num_occurrences()
            .unwrap_or_default();
        for _ in 0..repetitions {
            concrete.extend(self.arguments[first_repeated..=last_repeated].iter().cloned());
        }

        for arg in &self.arguments[last_repeated + 1..] {
            if arg.num_occurrences() == Some(1) {
                concrete.push(arg.clone());
            }
        }

        concrete
    }

    /// Validate the whole signature: each argument in isolation, then the
    /// cross-argument rules.
    pub fn is_valid(&self) -> Result<()> {
        if self.result_type.is_repeated() || self.result_type.is_optional() {
            return Err(SquallError::new(
                "Result type cannot be repeated or optional",
            ));
        }

        // A templated result type must be inferable from some argument. The
        // result may be ARBITRARY for signatures that resolve outside this
        // core, and TVF results are always relation-shaped.
        if self.result_type.is_templated()
            && !self.result_type.is_arbitrary()
            && !self.result_type.is_relation()
        {
            let matches_an_argument = self
                .arguments
                .iter()
                .any(|arg| self.result_type.templated_kind_is_related(arg.kind()));
            if !matches_an_argument {
                return Err(SquallError::new(format!(
                    "Result type template must match an argument type template: {self}"
                )));
            }
        }

        let mut saw_optional = false;
        let mut in_repeated_block = false;
        let mut after_repeated_block = false;
        for (index, arg) in self.arguments.iter().enumerate() {
            arg.is_valid()?;

            if arg.is_void() {
                return Err(SquallError::new(format!(
                    "Arguments cannot have type VOID: {self}"
                )));
            }

            if arg.is_optional() {
                saw_optional = true;
            } else if saw_optional {
                return Err(SquallError::new(format!(
                    "Optional arguments must be at the end of the argument list: {self}"
                )));
            }

            if arg.is_repeated() {
                if after_repeated_block {
                    return Err(SquallError::new(format!(
                        "Repeated arguments must be consecutive: {self}"
                    )));
                }
                in_repeated_block = true;
            } else if in_repeated_block {
                after_repeated_block = true;
                in_repeated_block = false;
            }

            // A lambda's templated argument types must be derivable from
            // arguments declared before it, so a resolver can type the lambda
            // in one left-to-right pass.
            if let Some(lambda) = arg.lambda_signature() {
                for nested in lambda.argument_types() {
                    if !nested.is_templated() {
                        continue;
                    }
                    let related = self.arguments[..index]
                        .iter()
                        .any(|prev| nested.templated_kind_is_related(prev.kind()));
                    if !related {
                        return Err(SquallError::new(format!(
                            "Templated argument of lambda argument type must match an \
                             argument type before the lambda argument: {self}"
                        )));
                    }
                }
            }
        }

        if let (Some(first), Some(last)) = (
            self.first_repeated_argument_index(),
            self.last_repeated_argument_index(),
        ) {
            let occurrences = self.arguments[first].num_occurrences();
            for arg in &self.arguments[first..=last] {
                if arg.num_occurrences() != occurrences {
                    return Err(SquallError::new(format!(
                        "Repeated arguments must have the same num_occurrences: {self}"
                    )));
                }
            }

            // Necessary to disambiguate repeats from trailing optionals at a
            // call site, though not sufficient in every configuration; exact
            // disambiguation is the resolver's responsibility.
            if self.num_repeated_arguments() <= self.num_optional_arguments() {
                return Err(SquallError::new(format!(
                    "The number of repeated arguments ({}) must be greater than the number \
                     of optional arguments ({}) for signature: {self}",
                    self.num_repeated_arguments(),
                    self.num_optional_arguments()
                )));
            }
        }

        for (index, arg) in self.arguments.iter().enumerate() {
            if !arg.is_descriptor() {
                continue;
            }
            if let Some(offset) = arg.options().descriptor_table_offset {
                let valid = offset < self.arguments.len() && self.arguments[offset].is_relation();
                if !valid {
                    return Err(SquallError::new(format!(
                        "The table offset argument ({offset}) of descriptor at argument \
                         ({index}) should point to a valid table argument for signature: {self}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validate for use as a plain (scalar/aggregate) function signature.
    /// Relation types are reserved for table-valued functions.
    pub fn is_valid_for_function(&self) -> Result<()> {
        self.is_valid()?;
        for argument in &self.arguments {
            if argument.is_relation() {
                return Err(SquallError::new(format!(
                    "Relation arguments are only allowed in table-valued functions: {self}"
                )));
            }
        }
        if self.result_type.is_relation() {
            return Err(SquallError::new(format!(
                "Relation return types are only allowed in table-valued functions: {self}"
            )));
        }
        if self.result_type.is_void() {
            return Err(SquallError::new(format!(
                "Function must have a return type: {self}"
            )));
        }
        Ok(())
    }

    /// Validate for use as a table-valued function signature.
    pub fn is_valid_for_table_valued_function(&self) -> Result<()> {
        self.is_valid()?;

        // Relation arguments bind positionally, so they must come before any
        // optional or repeated argument.
        let mut seen_non_required_args = false;
        for argument in &self.arguments {
            if argument.is_relation() {
                if argument.is_repeated() {
                    return Err(SquallError::new(format!(
                        "Repeated relation argument is not supported: {self}"
                    )));
                }
                if seen_non_required_args {
                    return Err(SquallError::new(format!(
                        "Relation arguments cannot follow repeated or optional arguments: {self}"
                    )));
                }
                if let Some(schema) = &argument.options().relation_input_schema
                    && let Some(duplicate) = schema.duplicate_column_name()
                {
                    return Err(SquallError::new(format!(
                        "Duplicate column name '{duplicate}' in relation input schema: {self}"
                    )));
                }
            } else if argument.options().relation_input_schema.is_some() {
                return Err(SquallError::new(format!(
                    "Relation input schema can only be used with relation arguments: {self}"
                )));
            }
            if !argument.is_required() {
                seen_non_required_args = true;
            }
        }

        if !self.result_type.is_relation() {
            return Err(SquallError::new(format!(
                "Table-valued functions must have relation return type: {self}"
            )));
        }
        Ok(())
    }

    /// Validate for use as a procedure signature.
    pub fn is_valid_for_procedure(&self) -> Result<()> {
        self.is_valid()?;
        for argument in &self.arguments {
            if argument.is_relation() {
                return Err(SquallError::new(format!(
                    "Relation arguments are only allowed in table-valued functions: {self}"
                )));
            }
        }
        if self.result_type.is_relation() {
            return Err(SquallError::new(format!(
                "Relation return types are only allowed in table-valued functions: {self}"
            )));
        }
        Ok(())
    }

    /// Bind a concrete type to the result once it has been resolved against
    /// a call. The one permitted post-construction mutation.
    pub fn set_concrete_result_type(&mut self, datatype: DataType) {
        self.result_type = FunctionArgumentType::fixed(datatype).with_num_occurrences(1);
        // The signature's concreteness may have changed with the result.
        self.is_concrete = self.compute_is_concrete();
    }

    /// Diagnostic rendering, e.g. `concat(Utf8, repeated <T1>) -> Utf8`.
    pub fn debug_string(&self, function_name: &str, verbose: bool) -> String {
        let args = self
            .arguments
            .iter()
            .map(|arg| arg.debug_string(verbose))
            .collect::<Vec<_>>()
            .join(", ");
        let mut result = format!(
            "{function_name}({args}) -> {}",
            self.result_type.debug_string(verbose)
        );
        if verbose {
            if self.options.is_deprecated {
                result.push_str(" (deprecated)");
            }
            if !self.options.additional_deprecation_warnings.is_empty() {
                result.push_str(&format!(
                    " ({} deprecation warnings)",
                    self.options.additional_deprecation_warnings.len()
                ));
            }
        }
        result
    }

    /// Render the signature as a displayable SQL declaration.
    ///
    /// `argument_names` supplies names positionally; missing names are
    /// omitted. The `RETURNS` clause is suppressed when the result carries no
    /// information (void, arbitrary, or a relation without a schema).
    pub fn sql_declaration(&self, argument_names: &[&str]) -> String {
        let mut out = String::from("(");
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if argument.options().procedure_argument_mode != ProcedureArgumentMode::NotSet {
                out.push_str(argument.options().procedure_argument_mode.name());
                out.push(' ');
            }
            if let Some(name) = argument_names.get(i) {
                out.push_str(&identifier_literal(name));
                out.push(' ');
            }
            out.push_str(&argument.sql_declaration());
        }
        out.push(')');

        let suppress_returns = self.result_type.is_void()
            || self.result_type.is_arbitrary()
            || (self.result_type.is_relation() && !self.result_type.is_fixed_relation());
        if !suppress_returns {
            out.push_str(" RETURNS ");
            out.push_str(&self.result_type.sql_declaration());
        }
        out
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_string("", false))
    }
}

/// Render all signatures of a function for error messages listing the
/// supported overloads.
pub fn signatures_to_string(signatures: &[FunctionSignature]) -> String {
    signatures
        .iter()
        .map(|signature| signature.debug_string("", false))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Quote an identifier for SQL output if it isn't a plain identifier.
fn identifier_literal(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("`{name}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::argument::{
        ArgumentCardinality, FunctionArgumentType, SignatureArgumentKind,
    };
    use crate::functions::options::FunctionArgumentTypeOptions;
    use crate::functions::table::{TvfColumn, TvfRelation};
    use crate::scalar::ScalarValue;

    fn required(kind: SignatureArgumentKind) -> FunctionArgumentType {
        FunctionArgumentType::new(kind, ArgumentCardinality::Required)
    }

    fn optional(kind: SignatureArgumentKind) -> FunctionArgumentType {
        FunctionArgumentType::new(kind, ArgumentCardinality::Optional)
    }

    fn repeated(kind: SignatureArgumentKind) -> FunctionArgumentType {
        FunctionArgumentType::new(kind, ArgumentCardinality::Repeated)
    }

    fn int64() -> SignatureArgumentKind {
        SignatureArgumentKind::Fixed(DataType::Int64)
    }

    fn relation_result() -> FunctionArgumentType {
        required(SignatureArgumentKind::Relation)
    }

    #[test]
    fn derived_argument_counts() {
        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![
                required(int64()),
                repeated(int64()),
                repeated(int64()),
                optional(int64()),
            ],
            1,
        );
        assert_eq!(2, signature.num_repeated_arguments());
        assert_eq!(1, signature.num_optional_arguments());
        assert_eq!(1, signature.num_required_arguments());
        // Two repeated > one optional, so this shape is accepted.
        signature.is_valid().unwrap();
    }

    #[test]
    fn cardinality_sequence_invariants() {
        use ArgumentCardinality::*;

        // Check every cardinality sequence up to length 4 against the two
        // structural rules: optionals form a suffix, repeateds form one
        // contiguous block. Occurrence-count and repeat-vs-optional-count
        // rules don't apply to unbound simple arguments with zero or one
        // optional.
        let all = [Required, Optional, Repeated];
        for len in 0..=4usize {
            for mut combo in (0..3usize.pow(len as u32)).map(|mut n| {
                let mut seq = Vec::with_capacity(len);
                for _ in 0..len {
                    seq.push(all[n % 3]);
                    n /= 3;
                }
                seq
            }) {
                let optional_suffix_ok = {
                    let mut saw_optional = false;
                    let mut ok = true;
                    for c in &combo {
                        match c {
                            Optional => saw_optional = true,
                            _ if saw_optional => ok = false,
                            _ => {}
                        }
                    }
                    ok
                };
                let repeated_contiguous_ok = {
                    let first = combo.iter().position(|c| *c == Repeated);
                    let last = combo.iter().rposition(|c| *c == Repeated);
                    match (first, last) {
                        (Some(f), Some(l)) => combo[f..=l].iter().all(|c| *c == Repeated),
                        _ => true,
                    }
                };
                let repeated_exceeds_optional_ok = {
                    let repeats = combo.iter().filter(|c| **c == Repeated).count();
                    let optionals = combo.iter().filter(|c| **c == Optional).count();
                    repeats == 0 || repeats > optionals
                };

                let arguments = combo
                    .drain(..)
                    .map(|c| FunctionArgumentType::new(int64(), c))
                    .collect::<Vec<_>>();
                let signature =
                    FunctionSignature::new(FunctionArgumentType::fixed(DataType::Boolean), arguments, 0);

                let expected =
                    optional_suffix_ok && repeated_contiguous_ok && repeated_exceeds_optional_ok;
                assert_eq!(
                    expected,
                    signature.is_valid().is_ok(),
                    "signature: {signature}"
                );
            }
        }
    }

    #[test]
    fn void_arguments_rejected() {
        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![required(SignatureArgumentKind::Void)],
            0,
        );
        let err = signature.is_valid().unwrap_err();
        assert!(err.to_string().contains("VOID"), "{err}");
    }

    #[test]
    fn result_type_cardinality_rejected() {
        let signature = FunctionSignature::new(
            optional(int64()),
            vec![required(int64())],
            0,
        );
        let err = signature.is_valid().unwrap_err();
        assert!(err.to_string().contains("repeated or optional"), "{err}");
    }

    #[test]
    fn templated_result_must_relate_to_an_argument() {
        // f(REPEATED ANY_1) -> ARRAY<ANY_1> is fine: the result's template
        // binds through the argument.
        let ok = FunctionSignature::new(
            required(SignatureArgumentKind::ArrayAny1),
            vec![repeated(SignatureArgumentKind::Any1)],
            0,
        );
        ok.is_valid().unwrap();

        // f(REPEATED ANY_1) -> ANY_2 leaves the result unbound.
        let bad = FunctionSignature::new(
            required(SignatureArgumentKind::Any2),
            vec![repeated(SignatureArgumentKind::Any1)],
            0,
        );
        let err = bad.is_valid().unwrap_err();
        assert!(
            err.to_string()
                .contains("Result type template must match an argument type template"),
            "{err}"
        );

        // ARBITRARY results resolve outside this core.
        let arbitrary = FunctionSignature::new(
            required(SignatureArgumentKind::Arbitrary),
            vec![required(int64())],
            0,
        );
        arbitrary.is_valid().unwrap();

        // Relation results are exempt (TVF results are always relations).
        let tvf = FunctionSignature::new(relation_result(), vec![required(int64())], 0);
        tvf.is_valid().unwrap();
    }

    #[test]
    fn lambda_templates_must_bind_left_to_right() {
        let lambda = FunctionArgumentType::lambda(
            vec![required(SignatureArgumentKind::Any1)],
            FunctionArgumentType::fixed(DataType::Boolean),
        )
        .unwrap();

        // ARRAY_FILTER(ARRAY<T1>, LAMBDA(T1 -> BOOL)) -> ARRAY<T1>
        let ok = FunctionSignature::new(
            required(SignatureArgumentKind::ArrayAny1),
            vec![required(SignatureArgumentKind::ArrayAny1), lambda.clone()],
            0,
        );
        ok.is_valid().unwrap();

        // The lambda can't come before the argument that binds T1...
        let bad = FunctionSignature::new(
            required(SignatureArgumentKind::ArrayAny1),
            vec![lambda.clone(), required(SignatureArgumentKind::ArrayAny1)],
            0,
        );
        let err = bad.is_valid().unwrap_err();
        assert!(err.to_string().contains("before the lambda argument"), "{err}");

        // ...even when the lambda is the only argument.
        let alone = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![lambda],
            0,
        );
        alone.is_valid().unwrap_err();

        // Lambdas with only fixed nested types bind nothing and go anywhere.
        let fixed_lambda = FunctionArgumentType::lambda(
            vec![FunctionArgumentType::fixed(DataType::Int64)],
            FunctionArgumentType::fixed(DataType::Boolean),
        )
        .unwrap();
        let ok = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![fixed_lambda],
            0,
        );
        ok.is_valid().unwrap();
    }

    #[test]
    fn repeated_block_occurrences_must_agree() {
        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![
                repeated(int64()).with_num_occurrences(2),
                repeated(SignatureArgumentKind::Fixed(DataType::Utf8)).with_num_occurrences(3),
            ],
            0,
        );
        let err = signature.is_valid().unwrap_err();
        assert!(err.to_string().contains("same num_occurrences"), "{err}");
    }

    #[test]
    fn descriptor_table_offsets_checked() {
        let descriptor = |offset| {
            FunctionArgumentType::with_options(
                SignatureArgumentKind::Descriptor,
                FunctionArgumentTypeOptions::new(ArgumentCardinality::Required)
                    .with_descriptor_table_offset(offset),
            )
        };

        let ok = FunctionSignature::new(
            relation_result(),
            vec![required(SignatureArgumentKind::Relation), descriptor(0)],
            0,
        );
        ok.is_valid().unwrap();

        // Offset pointing at a non-relation argument.
        let bad = FunctionSignature::new(
            relation_result(),
            vec![required(int64()), descriptor(0)],
            0,
        );
        let err = bad.is_valid().unwrap_err();
        assert!(err.to_string().contains("table offset"), "{err}");

        // Offset out of range.
        let bad = FunctionSignature::new(
            relation_result(),
            vec![required(SignatureArgumentKind::Relation), descriptor(7)],
            0,
        );
        bad.is_valid().unwrap_err();
    }

    #[test]
    fn concrete_argument_expansion() {
        // f(INT64 a, OPTIONAL STRING b DEFAULT 'x', REPEATED BOOL c) -> BOOL
        // with occurrences {a: 1, b: 1, c: 4} expands to [a, b, c, c, c, c].
        let a = FunctionArgumentType::fixed(DataType::Int64).with_num_occurrences(1);
        let b = FunctionArgumentType::with_options(
            SignatureArgumentKind::Fixed(DataType::Utf8),
            FunctionArgumentTypeOptions::new(ArgumentCardinality::Optional)
                .with_default(ScalarValue::from("x")),
        )
        .with_num_occurrences(1);
        let c = FunctionArgumentType::new(
            SignatureArgumentKind::Fixed(DataType::Boolean),
            ArgumentCardinality::Repeated,
        )
        .with_num_occurrences(4);

        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean).with_num_occurrences(1),
            vec![a.clone(), b.clone(), c.clone()],
            0,
        );
        assert!(signature.is_concrete());

        let concrete = signature.concrete_arguments();
        assert_eq!(6, concrete.len());
        assert_eq!(a, concrete[0]);
        assert_eq!(b, concrete[1]);
        for arg in &concrete[2..] {
            assert_eq!(c, *arg);
        }
    }

    #[test]
    fn repeated_block_expands_as_a_unit() {
        // Two repeated positions advancing together, as in multi-key IN.
        let k = repeated(int64()).with_num_occurrences(2);
        let v = repeated(SignatureArgumentKind::Fixed(DataType::Utf8)).with_num_occurrences(2);
        let trailing = FunctionArgumentType::new(
            SignatureArgumentKind::Fixed(DataType::Boolean),
            ArgumentCardinality::Optional,
        )
        .with_num_occurrences(0);

        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean).with_num_occurrences(1),
            vec![k.clone(), v.clone(), trailing],
            0,
        );
        signature.is_valid().unwrap();

        // Block of 2 declared arguments x 2 repetitions; the omitted optional
        // contributes nothing.
        let concrete = signature.concrete_arguments();
        assert_eq!(4, concrete.len());
        assert_eq!(k, concrete[0]);
        assert_eq!(v, concrete[1]);
        assert_eq!(k, concrete[2]);
        assert_eq!(v, concrete[3]);
    }

    #[test]
    fn expansion_is_empty_without_concrete_arguments() {
        let signature = FunctionSignature::new(
            required(SignatureArgumentKind::Any1),
            vec![required(SignatureArgumentKind::Any1)],
            0,
        );
        assert!(!signature.is_concrete());
        assert!(signature.concrete_arguments().is_empty());
    }

    #[test]
    fn set_concrete_result_type_binds_result() {
        let mut signature = FunctionSignature::new(
            required(SignatureArgumentKind::Any1),
            vec![required(SignatureArgumentKind::Fixed(DataType::Int64)).with_num_occurrences(1)],
            0,
        );
        assert!(!signature.is_concrete());

        signature.set_concrete_result_type(DataType::Int64);
        assert!(signature.is_concrete());
        assert_eq!(
            Some(&DataType::Int64),
            signature.result_type().concrete_type()
        );
    }

    #[test]
    fn function_context_rejects_relations_and_void() {
        let with_relation = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![required(SignatureArgumentKind::Relation)],
            0,
        );
        with_relation.is_valid().unwrap();
        with_relation.is_valid_for_function().unwrap_err();

        let void_result = FunctionSignature::new(
            required(SignatureArgumentKind::Void),
            vec![required(int64())],
            0,
        );
        void_result.is_valid().unwrap();
        let err = void_result.is_valid_for_function().unwrap_err();
        assert!(err.to_string().contains("return type"), "{err}");

        // Procedures may return void but still reject relations.
        void_result.is_valid_for_procedure().unwrap();
        with_relation.is_valid_for_procedure().unwrap_err();
    }

    #[test]
    fn tvf_context_rules() {
        let ok = FunctionSignature::new(
            relation_result(),
            vec![required(SignatureArgumentKind::Relation), optional(int64())],
            0,
        );
        ok.is_valid_for_table_valued_function().unwrap();

        // Result must be a relation.
        let bad_result = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![required(SignatureArgumentKind::Relation)],
            0,
        );
        bad_result.is_valid_for_table_valued_function().unwrap_err();

        // Relation arguments can't be repeated.
        let repeated_relation = FunctionSignature::new(
            relation_result(),
            vec![repeated(SignatureArgumentKind::Relation)],
            0,
        );
        repeated_relation
            .is_valid_for_table_valued_function()
            .unwrap_err();

        // Relation arguments must come before optional arguments.
        let relation_after_optional = FunctionSignature::new(
            relation_result(),
            vec![
                optional(int64()),
                optional(SignatureArgumentKind::Relation),
            ],
            0,
        );
        relation_after_optional
            .is_valid_for_table_valued_function()
            .unwrap_err();

        // Schema column names must be unique, case-insensitively.
        let schema = TvfRelation::new(vec![
            TvfColumn::new("a", DataType::Int64),
            TvfColumn::new("A", DataType::Utf8),
        ]);
        let dup_columns = FunctionSignature::new(
            relation_result(),
            vec![FunctionArgumentType::with_options(
                SignatureArgumentKind::Relation,
                FunctionArgumentTypeOptions::new(ArgumentCardinality::Required)
                    .with_relation_input_schema(schema, true),
            )],
            0,
        );
        let err = dup_columns
            .is_valid_for_table_valued_function()
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate column name"), "{err}");

        // Schemas are only meaningful on relation arguments.
        let schema = TvfRelation::new(vec![TvfColumn::new("a", DataType::Int64)]);
        let misplaced_schema = FunctionSignature::new(
            relation_result(),
            vec![FunctionArgumentType::with_options(
                int64(),
                FunctionArgumentTypeOptions::new(ArgumentCardinality::Required)
                    .with_relation_input_schema(schema, true),
            )],
            0,
        );
        misplaced_schema
            .is_valid_for_table_valued_function()
            .unwrap_err();
    }

    #[test]
    fn debug_strings() {
        let signature = FunctionSignature::new(
            required(SignatureArgumentKind::ArrayAny1),
            vec![
                required(SignatureArgumentKind::Any1),
                repeated(SignatureArgumentKind::Any1),
            ],
            0,
        );
        assert_eq!(
            "array_append(<T1>, repeated <T1>) -> <array<T1>>",
            signature.debug_string("array_append", false)
        );
        assert_eq!(
            "(<T1>, repeated <T1>) -> <array<T1>>",
            signature.to_string()
        );

        let deprecated = FunctionSignature::with_options(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![required(int64())],
            0,
            FunctionSignatureOptions::new().with_deprecated(),
        );
        assert!(deprecated.debug_string("f", true).contains("(deprecated)"));

        let listing = signatures_to_string(&[
            FunctionSignature::new(
                FunctionArgumentType::fixed(DataType::Boolean),
                vec![required(int64())],
                0,
            ),
            FunctionSignature::new(
                FunctionArgumentType::fixed(DataType::Boolean),
                vec![required(SignatureArgumentKind::Fixed(DataType::Utf8))],
                0,
            ),
        ]);
        assert_eq!("(Int64) -> Boolean; (Utf8) -> Boolean", listing);
    }

    #[test]
    fn sql_declarations() {
        let b = FunctionArgumentType::with_options(
            SignatureArgumentKind::Fixed(DataType::Utf8),
            FunctionArgumentTypeOptions::new(ArgumentCardinality::Optional)
                .with_default(ScalarValue::from("x")),
        );
        let signature = FunctionSignature::new(
            FunctionArgumentType::fixed(DataType::Boolean),
            vec![FunctionArgumentType::fixed(DataType::Int64), b],
            0,
        );
        assert_eq!(
            "(a INT64, b /*optional*/ STRING DEFAULT 'x') RETURNS BOOL",
            signature.sql_declaration(&["a", "b"])
        );

        // Unnamed arguments and quoted identifiers.
        assert_eq!(
            "(INT64, /*optional*/ STRING DEFAULT 'x') RETURNS BOOL",
            signature.sql_declaration(&[])
        );
        assert!(
            signature
                .sql_declaration(&["arg 1", "b"])
                .starts_with("(`arg 1` INT64")
        );

        // Procedure argument modes are rendered before the name.
        let out_arg = FunctionArgumentType::with_options(
            int64(),
            FunctionArgumentTypeOptions::new(ArgumentCardinality::Required)
                .with_procedure_argument_mode(ProcedureArgumentMode::Out),
        );
        let procedure = FunctionSignature::new(
            required(SignatureArgumentKind::Void),
            vec![out_arg],
            0,
        );
        assert_eq!("(OUT result INT64)", procedure.sql_declaration(&["result"]));

        // RETURNS is suppressed for schema-less relation results.
        let tvf = FunctionSignature::new(
            relation_result(),
            vec![required(SignatureArgumentKind::Relation)],
            0,
        );
        assert_eq!("(ANY TABLE)", tvf.sql_declaration(&[]));
    }
}
