//! Which parameter kinds must, may or must not be quoted

use crate::parameters::RawParameter;
use crate::types::{ParameterKind, ValueType};

/// Check the quoting of a supplied parameter. Empty values always pass.
pub fn quoting_ok(kind: ParameterKind, value_type: ValueType, raw: &RawParameter) -> bool {
    if raw.value.is_empty() {
        return true;
    }

    match kind {
        ParameterKind::Query
        | ParameterKind::Scale
        | ParameterKind::Period
        | ParameterKind::SecNeg
        | ParameterKind::SecZero => !raw.is_quoted,

        ParameterKind::Pattern => {
            let unquoted_allowed =
                raw.value.bytes().all(|b| b.is_ascii_digit()) && value_type.is_numeric();
            unquoted_allowed || raw.is_quoted
        }

        ParameterKind::Percent | ParameterKind::NumSuffix => true,

        ParameterKind::Fit
        | ParameterKind::Mode
        | ParameterKind::Operation
        | ParameterKind::NodataMode
        | ParameterKind::Function => raw.is_quoted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_kinds() {
        let quoted = RawParameter::new("\"5m\"");
        let plain = RawParameter::new("5m");
        for kind in [
            ParameterKind::Query,
            ParameterKind::Scale,
            ParameterKind::Period,
            ParameterKind::SecNeg,
            ParameterKind::SecZero,
        ] {
            assert!(quoting_ok(kind, ValueType::Float, &plain));
            assert!(!quoting_ok(kind, ValueType::Float, &quoted));
        }
    }

    #[test]
    fn test_empty_value_passes() {
        let empty_quoted = RawParameter::new("\"\"");
        assert!(quoting_ok(ParameterKind::Scale, ValueType::Float, &empty_quoted));
        assert!(quoting_ok(ParameterKind::Fit, ValueType::Float, &RawParameter::new("")));
    }

    #[test]
    fn test_quoted_kinds() {
        assert!(quoting_ok(ParameterKind::Fit, ValueType::Float, &RawParameter::new("\"linear\"")));
        assert!(!quoting_ok(ParameterKind::Fit, ValueType::Float, &RawParameter::new("linear")));
        assert!(!quoting_ok(ParameterKind::Operation, ValueType::Text, &RawParameter::new("eq")));
        assert!(!quoting_ok(
            ParameterKind::Function,
            ValueType::Text,
            &RawParameter::new("\"like\\\"")
        ));
    }

    #[test]
    fn test_optional_quoting() {
        for text in ["50", "\"50\""] {
            let raw = RawParameter::new(text);
            assert!(quoting_ok(ParameterKind::Percent, ValueType::Float, &raw));
            assert!(quoting_ok(ParameterKind::NumSuffix, ValueType::Float, &raw));
        }
    }

    #[test]
    fn test_pattern_depends_on_value_type() {
        let digits = RawParameter::new("42");
        assert!(quoting_ok(ParameterKind::Pattern, ValueType::Float, &digits));
        assert!(quoting_ok(ParameterKind::Pattern, ValueType::UInt64, &digits));
        assert!(!quoting_ok(ParameterKind::Pattern, ValueType::String, &digits));
        assert!(!quoting_ok(ParameterKind::Pattern, ValueType::Float, &RawParameter::new("4.2")));
        assert!(quoting_ok(ParameterKind::Pattern, ValueType::Log, &RawParameter::new("\"err\"")));
    }
}
