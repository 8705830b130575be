//! Trigger function call validation
//!
//! Checks a lexed call against its signature: arity, mandatory parameters,
//! quoting, joint-part completeness and kind-specific content. The first
//! failing check wins. A separate check decides whether the function accepts
//! the item value type.

pub mod error;
pub mod kinds;
pub mod quoting;

pub use error::{parameter_label, ErrorKind, ParameterFault, ValidationFailure, ValidationOutcome};
pub use kinds::ParameterChecker;
pub use quoting::quoting_ok;

use crate::config::ValidatorPreferences;
use crate::logging::codes;
use crate::parameters::RawParameter;
use crate::parsers::{FunctionCall, MacroMatcher, QueryParser};
use crate::signatures::{SignatureResult, SignatureTable};
use crate::types::{FunctionSignature, ValueType};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Construction options of a [`FunctionValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Accept LLD macros and LLD macro functions as macro escapes
    pub lld_macros: bool,
    /// Allow calculated item query extensions (wildcards, filters)
    pub calculated: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            lld_macros: true,
            calculated: false,
        }
    }
}

impl From<&ValidatorPreferences> for ValidatorOptions {
    fn from(preferences: &ValidatorPreferences) -> Self {
        Self {
            lld_macros: preferences.lld_macros,
            calculated: preferences.calculated,
        }
    }
}

/// Validates trigger function calls against a shared signature table.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct FunctionValidator {
    table: Arc<SignatureTable>,
    options: ValidatorOptions,
    macros: MacroMatcher,
    checker: ParameterChecker,
}

impl FunctionValidator {
    /// Validator over the standard trigger function catalogue
    pub fn new(options: ValidatorOptions) -> SignatureResult<Self> {
        Ok(Self::with_table(Arc::new(SignatureTable::standard()?), options))
    }

    pub fn from_preferences(preferences: &ValidatorPreferences) -> SignatureResult<Self> {
        Self::new(ValidatorOptions::from(preferences))
    }

    /// Validator over an existing table
    pub fn with_table(table: Arc<SignatureTable>, options: ValidatorOptions) -> Self {
        let macros = MacroMatcher::new(options.lld_macros);
        let checker = ParameterChecker::new(macros, QueryParser::new(options.calculated));
        Self {
            table,
            options,
            macros,
            checker,
        }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    /// Whole text is a user macro, or an LLD macro (function) when enabled
    pub fn is_macro(&self, text: &str) -> bool {
        self.macros.is_macro(text)
    }

    /// Validate a parameter list for the named function
    pub fn validate(
        &self,
        function_name: &str,
        parameters: &[RawParameter],
        value_type: ValueType,
    ) -> ValidationOutcome {
        let result = self.check_parameters(function_name, parameters, value_type);

        match &result {
            Ok(()) => log_success!(
                codes::success::CALL_VALIDATED,
                "Function parameters validated",
                "function" => function_name,
                "parameters" => parameters.len()
            ),
            Err(failure) => {
                let span = failure
                    .position
                    .and_then(|pos| parameters.get(pos))
                    .map(|param| param.span)
                    .filter(|span| *span != Span::dummy());
                log_error!(
                    failure.error_code(),
                    &failure.to_string(),
                    span = span,
                    "function" => function_name,
                    "reason" => failure.reason
                );
            }
        }

        result
    }

    /// Check that the named function accepts items of `value_type`
    pub fn validate_value_type(&self, function_name: &str, value_type: ValueType) -> ValidationOutcome {
        let signature = self.signature(function_name)?;

        if signature.allowed_value_types.contains(value_type) {
            log_success!(
                codes::success::VALUE_TYPE_ACCEPTED,
                "Value type accepted",
                "function" => function_name,
                "value_type" => value_type.as_str()
            );
            Ok(())
        } else {
            let failure = ValidationFailure::call(ErrorKind::UnsupportedValueType);
            log_error!(
                failure.error_code(),
                "Function does not support value type",
                "function" => function_name,
                "value_type" => value_type.as_str()
            );
            Err(failure)
        }
    }

    /// Parameter validation followed by the value type check
    pub fn validate_call(&self, call: &FunctionCall, value_type: ValueType) -> ValidationOutcome {
        self.validate(&call.name, &call.parameters, value_type)?;
        self.validate_value_type(&call.name, value_type)
    }

    /// A quoted macro only escapes checks where the kind accepts quoting
    fn is_macro_parameter(&self, param: &RawParameter, quoting_accepted: bool) -> bool {
        self.macros.is_macro(&param.raw_text)
            || (param.is_quoted && quoting_accepted && self.macros.is_macro(&param.value))
    }

    fn signature(&self, function_name: &str) -> Result<&FunctionSignature, ValidationFailure> {
        self.table
            .lookup(function_name)
            .ok_or(ValidationFailure::call(ErrorKind::UnknownFunction))
    }

    fn check_parameters(
        &self,
        function_name: &str,
        parameters: &[RawParameter],
        value_type: ValueType,
    ) -> ValidationOutcome {
        let signature = self.signature(function_name)?;

        if parameters.len() > signature.parameters.len() {
            return Err(ValidationFailure::call(ErrorKind::TooManyParameters));
        }

        for (position, spec) in signature.parameters.iter().enumerate() {
            let Some(param) = parameters.get(position) else {
                if spec.is_present_required() {
                    return Err(ValidationFailure::at(position, ErrorKind::MissingMandatory));
                }
                continue;
            };

            let quoting_accepted = quoting_ok(spec.kind, value_type, param);
            if self.is_macro_parameter(param, quoting_accepted) {
                log_debug!("Macro parameter accepted", "function" => function_name, "position" => position);
                continue;
            }

            if !quoting_accepted {
                return Err(ValidationFailure::at(position, ErrorKind::BadQuoting));
            }

            if spec.second_part_required() && !param.value.contains(':') {
                return Err(ValidationFailure::at(position, ErrorKind::MissingMandatory));
            }

            if !spec.mandatory.is_empty() {
                self.checker
                    .check(spec, param)
                    .map_err(|fault| ValidationFailure::invalid_value(position, fault))?;
            }

            log_debug!(
                "Parameter accepted",
                "function" => function_name,
                "position" => position,
                "kind" => spec.kind
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_call;
    use crate::types::{ParameterKind, ParameterSpec};
    use assert_matches::assert_matches;

    fn validator() -> FunctionValidator {
        FunctionValidator::new(ValidatorOptions::default()).unwrap()
    }

    fn validate(expression: &str, value_type: ValueType) -> ValidationOutcome {
        let call = parse_call(expression).unwrap();
        validator().validate(&call.name, &call.parameters, value_type)
    }

    fn params(texts: &[&str]) -> Vec<RawParameter> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let p = RawParameter::new(t);
                if i == 0 {
                    p.without_subparts()
                } else {
                    p
                }
            })
            .collect()
    }

    /// Smallest valid text for a mandatory parameter of each kind
    fn minimal(kind: ParameterKind) -> &'static str {
        match kind {
            ParameterKind::Query => "/host/key",
            ParameterKind::Scale => "5m",
            ParameterKind::SecNeg | ParameterKind::SecZero => "0",
            ParameterKind::Fit => "\"linear\"",
            ParameterKind::Mode => "\"value\"",
            ParameterKind::NumSuffix => "1",
            ParameterKind::Operation => "\"eq\"",
            ParameterKind::Percent => "50",
            ParameterKind::Pattern => "\"x\"",
            ParameterKind::Period => "1h:now/h",
            ParameterKind::NodataMode => "\"strict\"",
            ParameterKind::Function => "\"like\"",
        }
    }

    fn mandatory_only(signature: &FunctionSignature) -> Vec<&'static str> {
        signature
            .parameters
            .iter()
            .take_while(|spec| spec.is_present_required())
            .map(|spec| minimal(spec.kind))
            .collect()
    }

    #[test]
    fn test_every_signature_accepts_minimal_mandatory_call() {
        let validator = validator();
        for signature in validator.table().iter() {
            let texts = mandatory_only(signature);
            let outcome = validator.validate(&signature.name, &params(&texts), ValueType::Float);
            assert_eq!(outcome, Ok(()), "{}({})", signature.name, texts.join(","));
        }
    }

    #[test]
    fn test_missing_mandatory_parameter() {
        let validator = validator();
        for signature in validator.table().iter() {
            let texts = mandatory_only(signature);
            if texts.is_empty() {
                continue;
            }
            let last = texts.len() - 1;
            let outcome =
                validator.validate(&signature.name, &params(&texts[..last]), ValueType::Float);
            assert_eq!(
                outcome,
                Err(ValidationFailure::at(last, ErrorKind::MissingMandatory)),
                "{}",
                signature.name
            );
        }
    }

    #[test]
    fn test_too_many_parameters() {
        let validator = validator();
        for signature in validator.table().iter() {
            let mut texts: Vec<&str> = signature.parameters.iter().map(|s| minimal(s.kind)).collect();
            texts.push("1");
            let outcome = validator.validate(&signature.name, &params(&texts), ValueType::Float);
            assert_eq!(
                outcome,
                Err(ValidationFailure::call(ErrorKind::TooManyParameters)),
                "{}",
                signature.name
            );
        }
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            validate("nosuch(/host/key)", ValueType::Float),
            Err(ValidationFailure::call(ErrorKind::UnknownFunction))
        );
        assert_eq!(
            validator().validate_value_type("nosuch", ValueType::Float),
            Err(ValidationFailure::call(ErrorKind::UnknownFunction))
        );
    }

    #[test]
    fn test_macro_escape_for_every_kind() {
        let validator = validator();
        for signature in validator.table().iter() {
            for position in 0..signature.parameters.len() {
                let mut texts: Vec<&str> =
                    signature.parameters.iter().map(|s| minimal(s.kind)).collect();
                texts[position] = "{$MACRO}";
                let outcome = validator.validate(&signature.name, &params(&texts), ValueType::Float);
                assert_eq!(outcome, Ok(()), "{} #{}", signature.name, position);
            }
        }
    }

    #[test]
    fn test_quoted_macro_follows_quoting_rules() {
        assert_eq!(
            validate("last(/host/key,\"{$M}\")", ValueType::Float),
            Err(ValidationFailure::at(1, ErrorKind::BadQuoting))
        );
        assert_eq!(
            validate("trendavg(/host/key,\"{$P}\")", ValueType::Float),
            Err(ValidationFailure::at(1, ErrorKind::BadQuoting))
        );
        assert_eq!(
            validate("nodata(/host/key,\"{$T}\")", ValueType::Float),
            Err(ValidationFailure::at(1, ErrorKind::BadQuoting))
        );
        assert_eq!(
            validate("last(\"{$Q}\")", ValueType::Float),
            Err(ValidationFailure::at(0, ErrorKind::BadQuoting))
        );

        assert_eq!(validate("percentile(/host/key,5m,\"{$P}\")", ValueType::Float), Ok(()));
        assert_eq!(validate("forecast(/host/key,1h,0,\"{$FIT}\")", ValueType::Float), Ok(()));
        assert_eq!(validate("count(/host/key,5m,\"eq\",\"{$PATTERN}\")", ValueType::String), Ok(()));
    }

    #[test]
    fn test_lld_macro_escape_follows_option() {
        let call = parse_call("nodata(/host/key,{#TIMEOUT})").unwrap();
        assert_eq!(validator().validate(&call.name, &call.parameters, ValueType::Float), Ok(()));

        let no_lld = FunctionValidator::new(ValidatorOptions {
            lld_macros: false,
            calculated: false,
        })
        .unwrap();
        assert_eq!(
            no_lld.validate(&call.name, &call.parameters, ValueType::Float),
            Err(ValidationFailure::invalid_value(
                1,
                ParameterFault::Malformed { kind: ParameterKind::SecNeg }
            ))
        );
        assert!(!no_lld.is_macro("{#TIMEOUT}"));
        assert!(no_lld.is_macro("{$TIMEOUT}"));
    }

    #[test]
    fn test_quoting_examples() {
        assert_eq!(validate("last(/host/key,\"\")", ValueType::Float), Ok(()));
        assert_eq!(
            validate("last(/host/key,\"5m\")", ValueType::Float),
            Err(ValidationFailure::at(1, ErrorKind::BadQuoting))
        );
        assert_eq!(
            validate("forecast(/host/key,1h,3600,linear)", ValueType::Float),
            Err(ValidationFailure::at(3, ErrorKind::BadQuoting))
        );
        assert_eq!(validate("count(/host/key,5m,\"eq\",5)", ValueType::UInt64), Ok(()));
        assert_eq!(
            validate("count(/host/key,5m,\"eq\",5)", ValueType::String),
            Err(ValidationFailure::at(3, ErrorKind::BadQuoting))
        );
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert_matches!(
            validate("percentile(/host/key,5m,\"110\")", ValueType::Float),
            Err(ValidationFailure {
                position: Some(2),
                reason: ErrorKind::InvalidParameterValue,
                ..
            })
        );
        assert_eq!(validate("percentile(/host/key,5m,99.5)", ValueType::Float), Ok(()));
    }

    #[test]
    fn test_trend_periods() {
        assert_eq!(validate("trendavg(/host/key,1h:now/h)", ValueType::Float), Ok(()));
        assert_eq!(
            validate("trendavg(/host/key,1d:now/h)", ValueType::Float),
            Err(ValidationFailure::invalid_value(
                1,
                ParameterFault::ShiftPrecisionTooFine {
                    period_unit: 'd',
                    shift_unit: 'h'
                }
            ))
        );
        assert_eq!(validate("trendavg(/host/key,1h:now/m)", ValueType::Float), Ok(()));
        assert_eq!(
            validate("trendmax(/host/key,1h)", ValueType::Float),
            Err(ValidationFailure::at(1, ErrorKind::MissingMandatory))
        );
    }

    #[test]
    fn test_scale_joint_parsing() {
        assert_eq!(validate("avg(/host/key,600)", ValueType::Float), Ok(()));
        assert_eq!(validate("avg(/host/key,#3:now-1d)", ValueType::Float), Ok(()));
        assert_eq!(validate("forecast(/host/key,1h,3600,,)", ValueType::Float), Ok(()));
        assert_matches!(
            validate("avg(/host/key,0x10)", ValueType::Float),
            Err(ValidationFailure {
                position: Some(1),
                reason: ErrorKind::InvalidParameterValue,
                ..
            })
        );
    }

    #[test]
    fn test_optional_parameters_skip_content_checks() {
        // optional kinds are checked for quoting only
        assert_eq!(validate("forecast(/host/key,1h,0,\"cubic\")", ValueType::Float), Ok(()));
        assert_eq!(validate("nodata(/host/key,5m,\"lenient\")", ValueType::Float), Ok(()));
    }

    #[test]
    fn test_value_type_compatibility() {
        let validator = validator();
        assert_eq!(
            validator.validate_value_type("logeventid", ValueType::Float),
            Err(ValidationFailure::call(ErrorKind::UnsupportedValueType))
        );
        assert_eq!(validator.validate_value_type("logeventid", ValueType::Log), Ok(()));
        assert_eq!(validator.validate_value_type("avg", ValueType::UInt64), Ok(()));
        assert!(validator.validate_value_type("avg", ValueType::Text).is_err());

        let call = parse_call("logeventid(/host/key)").unwrap();
        assert_eq!(
            validator.validate_call(&call, ValueType::Float),
            Err(ValidationFailure::call(ErrorKind::UnsupportedValueType))
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = validator();
        let call = parse_call("trendavg(/host/key,1d:now/h)").unwrap();
        let first = validator.validate_call(&call, ValueType::Float);
        for _ in 0..3 {
            assert_eq!(validator.validate_call(&call, ValueType::Float), first);
        }
    }

    #[test]
    fn test_custom_table() {
        let table = SignatureTable::new(vec![FunctionSignature::new(
            "ratio",
            &[
                ParameterSpec::required(ParameterKind::Query),
                ParameterSpec::required(ParameterKind::Percent),
            ],
            crate::types::ValueTypeSet::NUMERIC,
        )])
        .unwrap();
        let validator = FunctionValidator::with_table(Arc::new(table), ValidatorOptions::default());
        assert_eq!(
            validator.validate("ratio", &params(&["/h/k", "12.5"]), ValueType::Float),
            Ok(())
        );
        assert_eq!(
            validator.validate("avg", &params(&["/h/k", "5m"]), ValueType::Float),
            Err(ValidationFailure::call(ErrorKind::UnknownFunction))
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let validator = Arc::new(validator());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let validator = Arc::clone(&validator);
                std::thread::spawn(move || {
                    let call = parse_call("avg(/host/key,5m)").unwrap();
                    validator.validate_call(&call, ValueType::Float)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(()));
        }
    }
}
