//! Source location tracking for trigger expressions
//!
//! Trigger function calls are single-line, so a span is a pair of byte
//! offsets into the expression text.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open byte range `[start, end)` in the expression text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span from byte offsets
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span at an offset
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Create an unknown/dummy span (useful for parameters built by hand)
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Smallest span covering both spans
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shift both offsets right by `delta`
    pub fn offset_by(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the source text for this span, if the offsets are in range
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start..self.end)
    }

    /// Format a message with the expression and a caret underline, cargo style
    pub fn format_error(&self, source: &str, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> column {}\n", self.start + 1));
        result.push_str("   |\n");
        result.push_str(&format!("   | {}\n", source));

        let lead = source
            .get(..self.start.min(source.len()))
            .map(|s| s.chars().count())
            .unwrap_or(0);
        let width = self
            .slice(source)
            .map(|s| s.chars().count())
            .unwrap_or(0)
            .max(1);

        result.push_str(&format!("   | {}{}\n", " ".repeat(lead), "^".repeat(width)));
        result
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
