//! Expression checking pipeline: lex the call, validate its parameters, then
//! check value type compatibility.

mod error;
mod report;

pub use error::PipelineError;
pub use report::{BatchResults, CheckReport};

use crate::parsers::parse_call;
use crate::types::ValueType;
use crate::validator::FunctionValidator;
use std::time::Instant;

/// Check a single call expression.
///
/// Lexing failures are errors; validation failures are reported in the
/// returned [`CheckReport`].
pub fn check_expression(
    validator: &FunctionValidator,
    expression: &str,
    value_type: ValueType,
) -> Result<CheckReport, PipelineError> {
    let start_time = Instant::now();
    crate::log_debug!("Checking expression", "expression" => expression);

    let call = parse_call(expression)?;
    let outcome = validator.validate_call(&call, value_type);

    Ok(CheckReport::new(
        expression,
        &call.name,
        &call.matched,
        value_type,
        outcome,
        start_time.elapsed(),
    ))
}

/// Check several expressions; `fail_fast` stops at the first invalid one
pub fn check_expressions<S: AsRef<str>>(
    validator: &FunctionValidator,
    expressions: &[S],
    value_type: ValueType,
    fail_fast: bool,
) -> BatchResults {
    let start_time = Instant::now();
    let mut results = BatchResults::new();

    for expression in expressions {
        let expression = expression.as_ref();
        let stop = match check_expression(validator, expression, value_type) {
            Ok(report) => {
                let valid = report.valid;
                results.add_report(report);
                !valid
            }
            Err(e) => {
                results.add_error(expression, e);
                true
            }
        };

        if stop && fail_fast {
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    crate::log_info!(&results.summary());
    results
}
