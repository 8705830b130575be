use crate::parsers::CallParseError;
use crate::signatures::SignatureError;

/// Errors that stop an expression from reaching validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("Call parsing failed: {0}")]
    CallParsing(#[from] CallParseError),

    #[error("Signature table construction failed: {0}")]
    Signatures(#[from] SignatureError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::codes::Code {
        match self {
            Self::CallParsing(e) => e.error_code(),
            Self::Signatures(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::types::{FunctionSignature, ValueTypeSet};
    use assert_matches::assert_matches;

    #[test]
    fn test_catalogue_failure_converts() {
        let now = || FunctionSignature::new("now", &[], ValueTypeSet::ALL);
        let error = crate::signatures::SignatureTable::new(vec![now(), now()])
            .map_err(PipelineError::from)
            .unwrap_err();
        assert_matches!(error, PipelineError::Signatures(SignatureError::DuplicateFunction { .. }));
        assert_eq!(error.error_code(), codes::signatures::DUPLICATE_FUNCTION);
        assert!(error.to_string().starts_with("Signature table construction failed"));
    }

    #[test]
    fn test_lexer_failure_converts() {
        let error = PipelineError::from(crate::parsers::parse_call("avg").unwrap_err());
        assert_eq!(error.error_code(), codes::parsing::MISSING_PARENTHESIS);
    }
}
