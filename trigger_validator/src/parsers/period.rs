//! Splitting joint `first:second` parameters

use super::macros::MacroMatcher;
use serde::Serialize;

/// The two halves of a joint parameter such as `5m:now-1h` or `1d:now/d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JointParts {
    pub first_part: String,
    /// `None` when the text has no separator, `Some("")` for a trailing colon
    pub second_part: Option<String>,
    pub first_part_has_macro: bool,
    pub second_part_has_macro: bool,
}

impl JointParts {
    /// Split at the first colon outside a macro
    pub fn split(text: &str, macros: &MacroMatcher) -> Self {
        let ranges = MacroMatcher::default().macro_ranges(text);
        let separator = text
            .char_indices()
            .find(|(i, c)| *c == ':' && !ranges.iter().any(|(s, e)| s < i && i < e))
            .map(|(i, _)| i);

        let (first, second) = match separator {
            Some(i) => (&text[..i], Some(&text[i + 1..])),
            None => (text, None),
        };

        Self {
            first_part: first.to_string(),
            second_part: second.map(str::to_string),
            first_part_has_macro: macros.contains_macro(first),
            second_part_has_macro: second.is_some_and(|s| macros.contains_macro(s)),
        }
    }

    pub fn has_separator(&self) -> bool {
        self.second_part.is_some()
    }

    /// Second half, or the empty string when absent
    pub fn second_or_empty(&self) -> &str {
        self.second_part.as_deref().unwrap_or("")
    }
}
