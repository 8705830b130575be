//! Error types for signature table construction

use crate::types::ParameterKind;

/// Result type for signature table construction
pub type SignatureResult<T> = Result<T, SignatureError>;

/// Catalogue inconsistencies detected when the table is built
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Duplicate trigger function '{name}' in signature catalogue")]
    DuplicateFunction { name: String },

    #[error("Function '{name}' parameter #{position} of kind '{kind}' is not joint but carries part flags")]
    JointFlagsOnSingleKind {
        name: String,
        position: usize,
        kind: ParameterKind,
    },

    #[error("Function '{name}' declares {declared} parameters, limit is {limit}")]
    TooManyDeclaredParameters {
        name: String,
        declared: usize,
        limit: usize,
    },
}

impl SignatureError {
    pub fn duplicate_function(name: &str) -> Self {
        Self::DuplicateFunction {
            name: name.to_string(),
        }
    }

    pub fn joint_flags_on_single_kind(name: &str, position: usize, kind: ParameterKind) -> Self {
        Self::JointFlagsOnSingleKind {
            name: name.to_string(),
            position,
            kind,
        }
    }

    pub fn too_many_declared_parameters(name: &str, declared: usize, limit: usize) -> Self {
        Self::TooManyDeclaredParameters {
            name: name.to_string(),
            declared,
            limit,
        }
    }

    /// Name of the offending function
    pub fn function_name(&self) -> &str {
        match self {
            Self::DuplicateFunction { name }
            | Self::JointFlagsOnSingleKind { name, .. }
            | Self::TooManyDeclaredParameters { name, .. } => name,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::DuplicateFunction { .. } => codes::signatures::DUPLICATE_FUNCTION,
            Self::JointFlagsOnSingleKind { .. } => codes::signatures::JOINT_FLAGS_ON_SINGLE_KIND,
            Self::TooManyDeclaredParameters { .. } => {
                codes::signatures::TOO_MANY_DECLARED_PARAMETERS
            }
        }
    }
}
