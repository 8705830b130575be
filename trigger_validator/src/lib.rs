// Internal modules
pub mod config;
#[macro_use]
pub mod logging;
pub mod parameters;
pub mod parsers;
pub mod pipeline;
pub mod signatures;
pub mod types;
pub mod utils;
pub mod validator;

// Re-export key types for library consumers
pub use parameters::RawParameter;
pub use parsers::{parse_call, CallParseError, FunctionCall};
pub use pipeline::{check_expression, check_expressions, BatchResults, CheckReport, PipelineError};
pub use signatures::{SignatureError, SignatureTable};
pub use types::{FunctionSignature, MandatoryFlags, ParameterKind, ParameterSpec, ValueType, ValueTypeSet};
pub use validator::{
    ErrorKind, FunctionValidator, ParameterFault, ValidationFailure, ValidationOutcome,
    ValidatorOptions,
};
