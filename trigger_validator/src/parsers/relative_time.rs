//! Relative time expressions such as `now-1d/d` or `now/w+2h`

use crate::config::constants::time::TIME_SUFFIXES_WITH_YEAR;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeTokenKind {
    /// `/u`, rounding down to the unit
    Precision,
    /// `+N[u]` or `-N[u]`
    Offset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeTimeToken {
    pub kind: RelativeTokenKind,
    /// Offset sign, `+` or `-`; absent for precision tokens
    pub sign: Option<char>,
    /// Offset amount; absent for precision tokens
    pub amount: Option<u64>,
    /// Unit suffix; offsets without a unit are seconds
    pub suffix: Option<char>,
}

impl RelativeTimeToken {
    fn precision(suffix: char) -> Self {
        Self {
            kind: RelativeTokenKind::Precision,
            sign: None,
            amount: None,
            suffix: Some(suffix),
        }
    }

    pub fn is_precision(&self) -> bool {
        self.kind == RelativeTokenKind::Precision
    }
}

/// Parse `now` followed by precision and offset tokens.
///
/// Returns `None` unless the whole text matches.
pub fn parse(text: &str) -> Option<Vec<RelativeTimeToken>> {
    let rest = text.strip_prefix("now")?;
    parse_tokens(rest, Vec::new())
}

/// Parse the text that follows a `now/` anchor: a bare precision unit, then
/// the same token sequence as [`parse`].
pub fn parse_rounded(text: &str) -> Option<Vec<RelativeTimeToken>> {
    let mut chars = text.chars();
    let unit = chars.next().filter(|c| is_unit(*c))?;
    parse_tokens(chars.as_str(), vec![RelativeTimeToken::precision(unit)])
}

fn is_unit(c: char) -> bool {
    TIME_SUFFIXES_WITH_YEAR.contains(c)
}

fn parse_tokens(mut rest: &str, mut tokens: Vec<RelativeTimeToken>) -> Option<Vec<RelativeTimeToken>> {
    while let Some(first) = rest.chars().next() {
        match first {
            '/' => {
                let unit = rest[1..].chars().next().filter(|c| is_unit(*c))?;
                tokens.push(RelativeTimeToken::precision(unit));
                rest = &rest[2..];
            }
            '+' | '-' => {
                let digits_len = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
                if digits_len == 0 {
                    return None;
                }
                // digits only, so the one possible failure is overflow
                let amount = rest[1..=digits_len].parse::<u64>().unwrap_or(u64::MAX);
                rest = &rest[1 + digits_len..];

                let suffix = rest.chars().next().filter(|c| is_unit(*c));
                if suffix.is_some() {
                    rest = &rest[1..];
                }

                tokens.push(RelativeTimeToken {
                    kind: RelativeTokenKind::Offset,
                    sign: Some(first),
                    amount: Some(amount),
                    suffix,
                });
            }
            _ => return None,
        }
    }

    Some(tokens)
}
