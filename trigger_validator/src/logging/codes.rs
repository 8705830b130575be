//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Signature catalogue construction error codes
pub mod signatures {
    use super::Code;

    pub const DUPLICATE_FUNCTION: Code = Code::new("E010");
    pub const JOINT_FLAGS_ON_SINGLE_KIND: Code = Code::new("E011");
    pub const TOO_MANY_DECLARED_PARAMETERS: Code = Code::new("E012");
}

/// Function call lexing error codes
pub mod parsing {
    use super::Code;

    pub const INVALID_FUNCTION_NAME: Code = Code::new("E020");
    pub const MISSING_PARENTHESIS: Code = Code::new("E021");
    pub const UNTERMINATED_QUOTE: Code = Code::new("E022");
    pub const UNEXPECTED_INPUT: Code = Code::new("E023");
    pub const LIMIT_EXCEEDED: Code = Code::new("E024");
}

/// Call validation error codes
pub mod validation {
    use super::Code;

    pub const UNKNOWN_FUNCTION: Code = Code::new("E040");
    pub const TOO_MANY_PARAMETERS: Code = Code::new("E041");
    pub const MISSING_MANDATORY: Code = Code::new("E042");
    pub const BAD_QUOTING: Code = Code::new("E043");
    pub const INVALID_PARAMETER_VALUE: Code = Code::new("E044");
    pub const UNSUPPORTED_VALUE_TYPE: Code = Code::new("E045");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const SIGNATURE_TABLE_BUILT: Code = Code::new("I002");
    pub const CALL_VALIDATED: Code = Code::new("I003");
    pub const VALUE_TYPE_ACCEPTED: Code = Code::new("I004");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Internal validator error",
        "Report the failing expression with its value type",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Validator initialization failed",
        "Check the signature catalogue and logging configuration",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        true,
        false,
        "Runtime configuration could not be loaded",
        "Fix the configuration file or remove it to use defaults",
    ),
    // Signatures
    ErrorMetadata::new(
        "E010",
        "Signatures",
        Severity::Critical,
        false,
        true,
        "Function declared more than once in the signature catalogue",
        "Remove the duplicate signature entry",
    ),
    ErrorMetadata::new(
        "E011",
        "Signatures",
        Severity::Critical,
        false,
        true,
        "Joint part flags set on a parameter kind that has no parts",
        "Only scale and period parameters may require a first or second part",
    ),
    ErrorMetadata::new(
        "E012",
        "Signatures",
        Severity::Critical,
        false,
        true,
        "Signature declares more parameters than the parser accepts",
        "Raise max_parameter_count in the build profile or shorten the signature",
    ),
    // Parsing
    ErrorMetadata::new(
        "E020",
        "Parsing",
        Severity::Medium,
        true,
        false,
        "Function name is missing or contains invalid characters",
        "Use a lowercase function name such as avg or last",
    ),
    ErrorMetadata::new(
        "E021",
        "Parsing",
        Severity::Medium,
        true,
        false,
        "Function call is missing a parenthesis",
        "Wrap the parameter list in parentheses",
    ),
    ErrorMetadata::new(
        "E022",
        "Parsing",
        Severity::Medium,
        true,
        false,
        "Quoted parameter is not terminated",
        "Close the string with a double quote",
    ),
    ErrorMetadata::new(
        "E023",
        "Parsing",
        Severity::Medium,
        true,
        false,
        "Unexpected text inside or after the function call",
        "Separate parameters with commas and end the call at the closing parenthesis",
    ),
    ErrorMetadata::new(
        "E024",
        "Parsing",
        Severity::High,
        true,
        false,
        "Expression exceeds a compile-time input limit",
        "Shorten the expression or rebuild with a larger profile",
    ),
    // Validation
    ErrorMetadata::new(
        "E040",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Unknown trigger function",
        "Check the function name against the supported catalogue",
    ),
    ErrorMetadata::new(
        "E041",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Invalid number of parameters",
        "Remove surplus parameters",
    ),
    ErrorMetadata::new(
        "E042",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Mandatory parameter is missing",
        "Supply every mandatory parameter, including both parts of joint periods",
    ),
    ErrorMetadata::new(
        "E043",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Parameter quoting does not match its kind",
        "Quote string parameters and leave queries and periods unquoted",
    ),
    ErrorMetadata::new(
        "E044",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Parameter value is invalid for its kind",
        "Check the parameter format for this function",
    ),
    ErrorMetadata::new(
        "E045",
        "Validation",
        Severity::Medium,
        true,
        false,
        "Function does not support the item value type",
        "Use a function compatible with the item value type",
    ),
    // Success
    ErrorMetadata::new(
        "I001",
        "System",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "Continue",
    ),
    ErrorMetadata::new(
        "I002",
        "Signatures",
        Severity::Low,
        true,
        false,
        "Signature catalogue built and verified",
        "Continue to validation",
    ),
    ErrorMetadata::new(
        "I003",
        "Validation",
        Severity::Low,
        true,
        false,
        "Function call parameters validated",
        "Continue to value type check",
    ),
    ErrorMetadata::new(
        "I004",
        "Validation",
        Severity::Low,
        true,
        false,
        "Function supports the item value type",
        "Continue",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        METADATA
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
