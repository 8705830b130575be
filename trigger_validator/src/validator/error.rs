//! Validation failures and their user-facing messages

use crate::config::compile_time::validation::MAX_ORDINAL_POSITIONS;
use crate::logging::codes;
use crate::types::{ParameterKind, ValueType};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// `Ok` when the call is legal, otherwise the first failure found
pub type ValidationOutcome = Result<(), ValidationFailure>;

const ORDINALS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

/// Why a call was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownFunction,
    TooManyParameters,
    MissingMandatory,
    BadQuoting,
    InvalidParameterValue,
    UnsupportedValueType,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownFunction => "unknown_function",
            ErrorKind::TooManyParameters => "too_many_parameters",
            ErrorKind::MissingMandatory => "missing_mandatory",
            ErrorKind::BadQuoting => "bad_quoting",
            ErrorKind::InvalidParameterValue => "invalid_parameter_value",
            ErrorKind::UnsupportedValueType => "unsupported_value_type",
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            ErrorKind::UnknownFunction => codes::validation::UNKNOWN_FUNCTION,
            ErrorKind::TooManyParameters => codes::validation::TOO_MANY_PARAMETERS,
            ErrorKind::MissingMandatory => codes::validation::MISSING_MANDATORY,
            ErrorKind::BadQuoting => codes::validation::BAD_QUOTING,
            ErrorKind::InvalidParameterValue => codes::validation::INVALID_PARAMETER_VALUE,
            ErrorKind::UnsupportedValueType => codes::validation::UNSUPPORTED_VALUE_TYPE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific detail behind an `InvalidParameterValue` failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case", tag = "fault")]
pub enum ParameterFault {
    #[error("{kind} parameter is malformed")]
    Malformed { kind: ParameterKind },

    #[error("{kind} parameter is out of range")]
    OutOfRange { kind: ParameterKind },

    #[error("Time units in period shift must be greater or equal to period time unit.")]
    ShiftPrecisionTooFine { period_unit: char, shift_unit: char },
}

impl ParameterFault {
    /// Text appended to the parameter message, if the fault has any
    pub fn detail(&self) -> Option<String> {
        match self {
            ParameterFault::ShiftPrecisionTooFine { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}

/// A rejected call: what went wrong and at which parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[error("{}", summary(.reason, .position, .fault))]
pub struct ValidationFailure {
    /// Zero-based parameter index; absent for call-level failures
    pub position: Option<usize>,
    pub reason: ErrorKind,
    pub fault: Option<ParameterFault>,
}

impl ValidationFailure {
    pub fn call(reason: ErrorKind) -> Self {
        Self {
            position: None,
            reason,
            fault: None,
        }
    }

    pub fn at(position: usize, reason: ErrorKind) -> Self {
        Self {
            position: Some(position),
            reason,
            fault: None,
        }
    }

    pub fn invalid_value(position: usize, fault: ParameterFault) -> Self {
        Self {
            position: Some(position),
            reason: ErrorKind::InvalidParameterValue,
            fault: Some(fault),
        }
    }

    pub fn error_code(&self) -> codes::Code {
        self.reason.error_code()
    }

    /// Render the message shown to users for the call text `matched`
    pub fn describe(&self, matched: &str, value_type: ValueType) -> String {
        match self.reason {
            ErrorKind::UnsupportedValueType => format!(
                "Incorrect item value type \"{}\" provided for trigger function \"{}\".",
                value_type.display_name(),
                matched
            ),
            _ => format!(
                "Incorrect trigger function \"{}\" provided in expression. {}",
                matched, self
            ),
        }
    }
}

/// "Invalid second parameter." style label for a zero-based position
pub fn parameter_label(position: usize) -> String {
    let named = MAX_ORDINAL_POSITIONS.min(ORDINALS.len());
    match ORDINALS.get(position) {
        Some(ordinal) if position < named => format!("Invalid {} parameter.", ordinal),
        _ => format!("Invalid parameter #{}.", position + 1),
    }
}

fn summary(
    reason: &ErrorKind,
    position: &Option<usize>,
    fault: &Option<ParameterFault>,
) -> String {
    match (reason, position) {
        (ErrorKind::UnknownFunction, _) => "Unknown function.".to_string(),
        (ErrorKind::TooManyParameters, _) => "Invalid number of parameters.".to_string(),
        (ErrorKind::MissingMandatory, _) => "Mandatory parameter is missing.".to_string(),
        (ErrorKind::UnsupportedValueType, _) => "Unsupported item value type.".to_string(),
        (ErrorKind::BadQuoting | ErrorKind::InvalidParameterValue, Some(pos)) => {
            match fault.as_ref().and_then(ParameterFault::detail) {
                Some(detail) => format!("{} {}", parameter_label(*pos), detail),
                None => parameter_label(*pos),
            }
        }
        (ErrorKind::BadQuoting | ErrorKind::InvalidParameterValue, None) => {
            "Invalid parameter.".to_string()
        }
    }
}
