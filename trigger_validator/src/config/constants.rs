//! Fixed domain constants shared by the parsers and validators.
//!
//! Unlike `compile_time`, these are not tunable: they describe the trigger
//! expression language itself.

pub mod time {
    /// Suffixes accepted after a plain seconds value (`5m`, `2w`).
    pub const TIME_SUFFIXES: &str = "smhdw";

    /// Suffixes accepted when months and years are allowed (`1M`, `1y`).
    pub const TIME_SUFFIXES_WITH_YEAR: &str = "smhdwMy";

    /// Size suffixes accepted by the number-with-suffix parser.
    pub const BYTE_SUFFIXES: &str = "KMGT";

    /// Precisions usable in trend periods, ordered by magnitude.
    pub const TREND_PRECISIONS: &str = "hdwMy";

    pub const SEC_PER_MIN: u64 = 60;
    pub const SEC_PER_HOUR: u64 = 3_600;
    pub const SEC_PER_DAY: u64 = 86_400;
    pub const SEC_PER_WEEK: u64 = 7 * SEC_PER_DAY;
    pub const SEC_PER_MONTH: u64 = 30 * SEC_PER_DAY;
    pub const SEC_PER_YEAR: u64 = 365 * SEC_PER_DAY;

    /// Seconds represented by a single unit suffix.
    pub fn seconds_per_unit(suffix: char) -> Option<u64> {
        match suffix {
            's' => Some(1),
            'm' => Some(SEC_PER_MIN),
            'h' => Some(SEC_PER_HOUR),
            'd' => Some(SEC_PER_DAY),
            'w' => Some(SEC_PER_WEEK),
            'M' => Some(SEC_PER_MONTH),
            'y' => Some(SEC_PER_YEAR),
            _ => None,
        }
    }
}

pub mod percent {
    /// Upper bound of a percentile argument.
    pub const MAX_PERCENT: f64 = 100.0;

    /// Digits allowed after the decimal point.
    pub const MAX_FRACTION_DIGITS: usize = 4;
}
