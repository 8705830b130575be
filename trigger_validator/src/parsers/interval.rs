//! Simple time intervals: a count with an optional unit suffix

use crate::config::constants::time::{seconds_per_unit, TIME_SUFFIXES, TIME_SUFFIXES_WITH_YEAR};

/// Parsed `\d+[unit]?` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleInterval {
    pub amount: u64,
    pub suffix: Option<char>,
}

impl SimpleInterval {
    /// Parse an interval; `with_year` additionally admits the `M` and `y` units
    pub fn parse(text: &str, with_year: bool) -> Option<Self> {
        let suffixes = if with_year {
            TIME_SUFFIXES_WITH_YEAR
        } else {
            TIME_SUFFIXES
        };

        let digits_len = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return None;
        }

        let (digits, rest) = text.split_at(digits_len);
        let mut rest_chars = rest.chars();
        let suffix = rest_chars.next();

        match suffix {
            Some(c) if !suffixes.contains(c) => return None,
            _ => {}
        }
        if rest_chars.next().is_some() {
            return None;
        }

        Some(Self {
            amount: digits.parse().unwrap_or(u64::MAX),
            suffix,
        })
    }

    /// Length in seconds, `None` on overflow
    pub fn seconds(&self) -> Option<u64> {
        let unit = match self.suffix {
            Some(c) => seconds_per_unit(c)?,
            None => 1,
        };
        self.amount.checked_mul(unit)
    }
}
