//! Raw, unvalidated function parameters

use crate::parsers::macros::MacroMatcher;
use crate::utils::Span;
use serde::Serialize;

pub use crate::parsers::period::JointParts;

/// One parameter as it appeared in the call text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawParameter {
    /// Text exactly as written, quotes included
    pub raw_text: String,
    pub is_quoted: bool,
    /// Unquoted and unescaped content; same as `raw_text` when unquoted
    pub value: String,
    #[serde(skip)]
    pub span: Span,
    /// Colon split of unquoted text, used by joint kinds
    pub structured_subparts: Option<JointParts>,
}

impl RawParameter {
    pub fn new(raw_text: &str) -> Self {
        let is_quoted = is_quoted(raw_text);
        let value = if is_quoted {
            unquote(raw_text)
        } else {
            raw_text.to_string()
        };
        let structured_subparts =
            (!is_quoted).then(|| JointParts::split(raw_text, &MacroMatcher::default()));

        Self {
            raw_text: raw_text.to_string(),
            is_quoted,
            value,
            span: Span::dummy(),
            structured_subparts,
        }
    }

    /// Parameter whose value is already known to be unquoted
    pub fn plain(value: &str) -> Self {
        Self {
            raw_text: value.to_string(),
            is_quoted: false,
            value: value.to_string(),
            span: Span::dummy(),
            structured_subparts: Some(JointParts::split(value, &MacroMatcher::default())),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn without_subparts(mut self) -> Self {
        self.structured_subparts = None;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Starts and ends with a double quote, and the closing quote is not escaped
pub fn is_quoted(text: &str) -> bool {
    text.starts_with('"') && text.ends_with('"') && !text.ends_with("\\\"")
}

/// Strip the surrounding quotes and resolve `\"` and `\\` escapes
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or("");

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting_rule() {
        assert!(is_quoted("\"abc\""));
        assert!(is_quoted("\"\""));
        // the closing quote counts as escaped even after a literal backslash
        assert!(!is_quoted("\"a\\\\\""));
        assert!(!is_quoted("\"abc\\\""));
        assert!(!is_quoted("abc"));
        assert!(!is_quoted("\"abc"));
        assert!(!is_quoted(""));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("\"say \\\"hi\\\"\""), "say \"hi\"");
        assert_eq!(unquote("\"a\\\\b\""), "a\\b");
        assert_eq!(unquote("\"a\\nb\""), "a\\nb");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\""), "");
    }

    #[test]
    fn test_new_parameter() {
        let quoted = RawParameter::new("\"linear\"");
        assert!(quoted.is_quoted);
        assert_eq!(quoted.value, "linear");
        assert!(quoted.structured_subparts.is_none());

        let joint = RawParameter::new("1h:now/h");
        assert!(!joint.is_quoted);
        let parts = joint.structured_subparts.unwrap();
        assert_eq!(parts.first_part, "1h");
        assert_eq!(parts.second_part.as_deref(), Some("now/h"));

        let empty = RawParameter::new("\"\"");
        assert!(empty.is_empty());
        assert_eq!(empty.raw_text, "\"\"");
    }

    #[test]
    fn test_plain_parameter() {
        let param = RawParameter::plain("5m").with_span(Span::new(3, 5));
        assert_eq!(param.raw_text, "5m");
        assert_eq!(param.span, Span::new(3, 5));
        assert!(param.without_subparts().structured_subparts.is_none());
    }
}
