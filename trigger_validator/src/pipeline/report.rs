use super::PipelineError;
use crate::types::ValueType;
use crate::validator::{ValidationFailure, ValidationOutcome};
use serde::Serialize;
use std::time::Duration;

/// Result of checking one expression
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub expression: String,
    pub function: String,
    pub matched: String,
    pub value_type: ValueType,
    pub valid: bool,
    pub failure: Option<ValidationFailure>,
    /// Rendered message, present when the call failed
    pub message: Option<String>,
    #[serde(skip)]
    pub duration: Duration,
}

impl CheckReport {
    pub fn new(
        expression: &str,
        function: &str,
        matched: &str,
        value_type: ValueType,
        outcome: ValidationOutcome,
        duration: Duration,
    ) -> Self {
        let failure = outcome.err();
        Self {
            expression: expression.to_string(),
            function: function.to_string(),
            matched: matched.to_string(),
            value_type,
            valid: failure.is_none(),
            message: failure.map(|f| f.describe(matched, value_type)),
            failure,
            duration,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Results of checking several expressions
#[derive(Debug, Default)]
pub struct BatchResults {
    pub reports: Vec<CheckReport>,
    pub errors: Vec<(String, PipelineError)>,
    pub processing_duration: Duration,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_report(&mut self, report: CheckReport) {
        self.reports.push(report);
    }

    pub fn add_error(&mut self, expression: &str, error: PipelineError) {
        self.errors.push((expression.to_string(), error));
    }

    pub fn total(&self) -> usize {
        self.reports.len() + self.errors.len()
    }

    pub fn valid_count(&self) -> usize {
        self.reports.iter().filter(|r| r.valid).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.total() - self.valid_count()
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_count() == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} expressions checked: {} valid, {} invalid ({} unparsable), {:.2}ms total",
            self.total(),
            self.valid_count(),
            self.invalid_count(),
            self.errors.len(),
            self.processing_duration.as_secs_f64() * 1000.0
        )
    }
}
