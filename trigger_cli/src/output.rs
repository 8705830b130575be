use serde::Serialize;
use trigger_validator::{CheckReport, PipelineError};

#[derive(Serialize)]
struct ErrorLine<'a> {
    expression: &'a str,
    valid: bool,
    error: String,
    code: &'static str,
}

pub fn print_report(report: &CheckReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    match &report.message {
        None => println!("OK    {}", report.matched),
        Some(message) => println!("FAIL  {}", message),
    }
    Ok(())
}

/// Expressions that never reached validation get a caret pointing at the problem
pub fn print_error(
    expression: &str,
    error: &PipelineError,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        let line = ErrorLine {
            expression,
            valid: false,
            error: error.to_string(),
            code: error.error_code().as_str(),
        };
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    match error {
        PipelineError::CallParsing(e) => {
            print!("{}", e.span().format_error(expression, &e.to_string()))
        }
        other => println!("error: {}", other),
    }
    Ok(())
}
