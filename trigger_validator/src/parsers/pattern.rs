//! Lazily compiled, process-wide regular expressions

use regex::Regex;
use std::sync::OnceLock;

/// A fixed regular expression compiled on first use.
///
/// A pattern that fails to compile matches nothing and reports the failure
/// once through the global logger.
pub struct StaticPattern {
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl StaticPattern {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    fn regex(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| match Regex::new(self.source) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    crate::log_error!(
                        crate::logging::codes::system::INTERNAL_ERROR,
                        "Built-in pattern failed to compile",
                        "pattern" => self.source,
                        "error" => e
                    );
                    None
                }
            })
            .as_ref()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex().is_some_and(|regex| regex.is_match(text))
    }

    /// Byte ranges of every non-overlapping match
    pub fn find_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        match self.regex() {
            Some(regex) => regex.find_iter(text).map(|m| (m.start(), m.end())).collect(),
            None => Vec::new(),
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }
}
