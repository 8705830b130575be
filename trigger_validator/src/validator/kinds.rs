//! Content checks for each parameter kind
//!
//! The macro escape has already run when these are called: a parameter whose
//! whole value is a macro never reaches this module.

use super::error::ParameterFault;
use crate::config::constants::percent::{MAX_FRACTION_DIGITS, MAX_PERCENT};
use crate::config::constants::time::{SEC_PER_HOUR, TREND_PRECISIONS};
use crate::parameters::{JointParts, RawParameter};
use crate::parsers::pattern::StaticPattern;
use crate::parsers::{number, relative_time, MacroMatcher, QueryParser, SimpleInterval};
use crate::types::{ParameterKind, ParameterSpec};
use std::borrow::Cow;

static SEC_VALUE: StaticPattern = StaticPattern::new(r"^[0-9]+[smhdw]?$");
static SEC_NEG_VALUE: StaticPattern = StaticPattern::new(r"^-?[0-9]+[smhdw]?$");
static COUNT_VALUE: StaticPattern = StaticPattern::new(r"^#[0-9]+$");
static PERCENT_VALUE: StaticPattern = StaticPattern::new(r"^[0-9]*(?:\.[0-9]*)?$");
static FIT_VALUE: StaticPattern =
    StaticPattern::new(r"^(?:linear|polynomial[1-6]|exponential|logarithmic|power)$");

const MODES: [&str; 5] = ["value", "max", "min", "delta", "avg"];
const STRING_FUNCTIONS: [&str; 3] = ["iregexp", "regexp", "like"];
const OPERATIONS: [&str; 11] = [
    "eq", "ne", "gt", "ge", "lt", "le", "like", "bitand", "regexp", "iregexp", "",
];

type KindResult = Result<(), ParameterFault>;

/// Runs the kind-specific content rules against one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterChecker {
    macros: MacroMatcher,
    queries: QueryParser,
}

impl ParameterChecker {
    pub fn new(macros: MacroMatcher, queries: QueryParser) -> Self {
        Self { macros, queries }
    }

    pub fn check(&self, spec: &ParameterSpec, param: &RawParameter) -> KindResult {
        let value = param.value.as_str();
        match spec.kind {
            ParameterKind::Query => self.check_query(value),
            ParameterKind::Scale => self.check_scale(spec, param),
            ParameterKind::SecZero => ensure(sec_value(value), spec.kind),
            ParameterKind::SecNeg => ensure(SEC_NEG_VALUE.is_match(value), spec.kind),
            ParameterKind::NumSuffix => ensure(number::is_number(value, true), spec.kind),
            ParameterKind::Fit => ensure(value.is_empty() || FIT_VALUE.is_match(value), spec.kind),
            ParameterKind::Mode => {
                ensure(value.is_empty() || MODES.contains(&value), spec.kind)
            }
            ParameterKind::Function => ensure(STRING_FUNCTIONS.contains(&value), spec.kind),
            ParameterKind::Operation => ensure(OPERATIONS.contains(&value), spec.kind),
            ParameterKind::NodataMode => {
                ensure(value.is_empty() || value == "strict", spec.kind)
            }
            ParameterKind::Percent => check_percent(value),
            ParameterKind::Period => self.check_period(spec, param),
            ParameterKind::Pattern => Ok(()),
        }
    }

    fn check_query(&self, value: &str) -> KindResult {
        ensure(self.queries.parse(value).is_some(), ParameterKind::Query)
    }

    /// Joint halves with macro flags matching this checker's macro options
    fn joint_parts<'p>(&self, param: &'p RawParameter) -> Option<Cow<'p, JointParts>> {
        let parts = param.structured_subparts.as_ref()?;
        if self.macros.lld_macros_enabled() {
            Some(Cow::Borrowed(parts))
        } else {
            Some(Cow::Owned(JointParts::split(&param.value, &self.macros)))
        }
    }

    /// `sec|#num:time_shift`
    fn check_scale(&self, spec: &ParameterSpec, param: &RawParameter) -> KindResult {
        let malformed = ParameterFault::Malformed {
            kind: ParameterKind::Scale,
        };
        let parts = self.joint_parts(param).ok_or(malformed)?;

        let first = parts.first_part.as_str();
        let first_ok = (!spec.first_part_required() && first.is_empty())
            || parts.first_part_has_macro
            || sec_num(first);

        let shift_ok = match parts.second_part.as_deref() {
            None | Some("") => !spec.second_part_required(),
            Some(_) if parts.second_part_has_macro => true,
            Some(shift) => relative_time::parse(shift).is_some(),
        };

        if first_ok && shift_ok {
            Ok(())
        } else {
            Err(malformed)
        }
    }

    /// `period:period_shift` of the trend functions
    fn check_period(&self, spec: &ParameterSpec, param: &RawParameter) -> KindResult {
        let kind = ParameterKind::Period;
        let parts = self
            .joint_parts(param)
            .ok_or(ParameterFault::Malformed { kind })?;

        if spec.first_part_required() && !parts.first_part_has_macro {
            let interval = SimpleInterval::parse(&parts.first_part, true)
                .ok_or(ParameterFault::Malformed { kind })?;
            let seconds = interval
                .seconds()
                .ok_or(ParameterFault::OutOfRange { kind })?;
            if seconds < SEC_PER_HOUR || seconds % SEC_PER_HOUR != 0 {
                return Err(ParameterFault::OutOfRange { kind });
            }
        }

        if !spec.second_part_required() {
            return Ok(());
        }

        let shift = parts.second_or_empty();
        match check_trend_shift(&parts.first_part, shift) {
            Err(_) if self.macros.is_macro(shift) => Ok(()),
            result => result,
        }
    }
}

fn ensure(ok: bool, kind: ParameterKind) -> KindResult {
    if ok {
        Ok(())
    } else {
        Err(ParameterFault::Malformed { kind })
    }
}

fn sec_value(value: &str) -> bool {
    SEC_VALUE.is_match(value)
}

/// Seconds (zero allowed) or a `#N` value count with N > 0
fn sec_num(value: &str) -> bool {
    if COUNT_VALUE.is_match(value) {
        value[1..].bytes().any(|b| b != b'0')
    } else {
        sec_value(value)
    }
}

/// Up to four decimals, not a bare dot, at most 100
fn check_percent(value: &str) -> KindResult {
    let kind = ParameterKind::Percent;
    if !PERCENT_VALUE.is_match(value) || value == "." {
        return Err(ParameterFault::Malformed { kind });
    }

    let fraction_digits = value.split_once('.').map_or(0, |(_, f)| f.len());
    if fraction_digits > MAX_FRACTION_DIGITS {
        return Err(ParameterFault::Malformed { kind });
    }

    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(percent) if percent <= MAX_PERCENT => Ok(()),
        Ok(_) => Err(ParameterFault::OutOfRange { kind }),
        Err(_) => Err(ParameterFault::Malformed { kind }),
    }
}

/// Every precision in the shift must be at least as coarse as the period unit.
///
/// Periods without a trend unit suffix (plain seconds) leave the shift unchecked.
fn check_trend_shift(period: &str, shift: &str) -> KindResult {
    let Some((period_unit, period_rank)) = period
        .chars()
        .last()
        .and_then(|c| TREND_PRECISIONS.find(c).map(|rank| (c, rank)))
    else {
        return Ok(());
    };

    let malformed = ParameterFault::Malformed {
        kind: ParameterKind::Period,
    };
    let anchored = shift.strip_prefix("now/").ok_or(malformed)?;
    let tokens = relative_time::parse_rounded(anchored).ok_or(malformed)?;

    for token in tokens.iter().filter(|t| t.is_precision()) {
        let Some(shift_unit) = token.suffix else {
            continue;
        };
        // units outside the trend order (s, m) are not ranked
        let coarse_enough = TREND_PRECISIONS
            .find(shift_unit)
            .map_or(true, |rank| rank >= period_rank);
        if !coarse_enough {
            return Err(ParameterFault::ShiftPrecisionTooFine {
                period_unit,
                shift_unit,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn checker() -> ParameterChecker {
        ParameterChecker::new(MacroMatcher::default(), QueryParser::new(false))
    }

    fn check(spec: ParameterSpec, text: &str) -> KindResult {
        checker().check(&spec, &RawParameter::new(text))
    }

    fn required(kind: ParameterKind) -> ParameterSpec {
        ParameterSpec::required(kind)
    }

    #[test]
    fn test_sec_values() {
        assert!(check(required(ParameterKind::SecZero), "0").is_ok());
        assert!(check(required(ParameterKind::SecZero), "5w").is_ok());
        assert!(check(required(ParameterKind::SecZero), "-5").is_err());
        assert!(check(required(ParameterKind::SecZero), "5y").is_err());
        assert!(check(required(ParameterKind::SecNeg), "-3h").is_ok());
        assert!(check(required(ParameterKind::SecNeg), "--3").is_err());
        assert!(check(required(ParameterKind::SecNeg), "3hh").is_err());
    }

    #[test]
    fn test_sec_num() {
        assert!(sec_num("#1"));
        assert!(sec_num("#010"));
        assert!(!sec_num("#0"));
        assert!(!sec_num("#"));
        assert!(sec_num("0"));
        assert!(sec_num("10m"));
        assert!(!sec_num("-1"));
        assert!(!sec_num(""));
    }

    #[test]
    fn test_scale() {
        let scale = required(ParameterKind::Scale);
        assert!(check(scale, "600").is_ok());
        assert!(check(scale, "#5:now-1h").is_ok());
        assert!(check(scale, "1h:now/d").is_ok());
        assert!(check(scale, "1h:").is_ok());
        assert!(check(scale, "{$P}:now-{$S}").is_ok());
        assert!(check(scale, "1h:yesterday").is_err());
        assert!(check(scale, ":now-1h").is_err());
        assert!(check(scale, "#0").is_err());
        assert!(check(scale, "1h:now-99999999999999999999h").is_ok());

        let optional = ParameterSpec::optional(ParameterKind::Scale);
        assert!(check(optional, ":now-1h").is_ok());

        // quoted text carries no joint split
        assert!(check(scale, "\"600\"").is_err());
    }

    #[test]
    fn test_scale_lld_flags_follow_options() {
        let no_lld = ParameterChecker::new(MacroMatcher::new(false), QueryParser::new(false));
        let param = RawParameter::new("{#P}:now-1h");
        let spec = required(ParameterKind::Scale);
        assert!(checker().check(&spec, &param).is_ok());
        assert!(no_lld.check(&spec, &param).is_err());
    }

    #[test]
    fn test_enumerated_kinds() {
        assert!(check(ParameterSpec::optional(ParameterKind::Fit), "\"polynomial6\"").is_ok());
        assert!(check(ParameterSpec::optional(ParameterKind::Fit), "\"polynomial7\"").is_err());
        assert!(check(ParameterSpec::optional(ParameterKind::Fit), "").is_ok());
        assert!(check(ParameterSpec::optional(ParameterKind::Mode), "\"delta\"").is_ok());
        assert!(check(ParameterSpec::optional(ParameterKind::Mode), "\"median\"").is_err());
        assert!(check(required(ParameterKind::Function), "\"iregexp\"").is_ok());
        assert!(check(required(ParameterKind::Function), "").is_err());
        assert!(check(required(ParameterKind::Operation), "\"bitand\"").is_ok());
        assert!(check(required(ParameterKind::Operation), "").is_ok());
        assert!(check(required(ParameterKind::Operation), "\"band\"").is_err());
        assert!(check(required(ParameterKind::NodataMode), "\"strict\"").is_ok());
        assert!(check(required(ParameterKind::NodataMode), "\"loose\"").is_err());
    }

    #[test]
    fn test_num_suffix() {
        assert!(check(required(ParameterKind::NumSuffix), "10.2G").is_ok());
        assert!(check(required(ParameterKind::NumSuffix), "-3h").is_ok());
        assert!(check(required(ParameterKind::NumSuffix), "ten").is_err());
    }

    #[test]
    fn test_percent() {
        for ok in ["0", "1", "1.2", "1.2345", "1.", ".1", "100", "100.0000", ""] {
            assert!(check_percent(ok).is_ok(), "{}", ok);
        }
        assert_matches!(
            check_percent("110"),
            Err(ParameterFault::OutOfRange { kind: ParameterKind::Percent })
        );
        assert!(check_percent("100.0001").is_err());
        for bad in [".", "1.23456", "1.2.3", "-1", "1e2", "abc"] {
            assert_matches!(check_percent(bad), Err(ParameterFault::Malformed { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_period_first_part() {
        let period = ParameterSpec::required_both_parts(ParameterKind::Period);
        assert!(check(period, "1h:now/h").is_ok());
        assert!(check(period, "7200:now/h").is_ok());
        assert!(check(period, "1M:now/M").is_ok());
        assert_matches!(
            check(period, "30m:now/h"),
            Err(ParameterFault::OutOfRange { .. })
        );
        assert_matches!(
            check(period, "5400:now/h"),
            Err(ParameterFault::OutOfRange { .. })
        );
        assert_matches!(check(period, "1x:now/h"), Err(ParameterFault::Malformed { .. }));
        assert!(check(period, "{$PERIOD}:now/h").is_ok());
    }

    #[test]
    fn test_trend_shift_precision() {
        let period = ParameterSpec::required_both_parts(ParameterKind::Period);
        assert!(check(period, "1d:now/d").is_ok());
        assert!(check(period, "1d:now/w-1w").is_ok());
        assert!(check(period, "1w:now/M-1M/y").is_ok());
        assert_matches!(
            check(period, "1d:now/h"),
            Err(ParameterFault::ShiftPrecisionTooFine {
                period_unit: 'd',
                shift_unit: 'h'
            })
        );
        assert!(check(period, "1h:now/m").is_ok());
        assert!(check(period, "1d:now/s-1d").is_ok());
        assert_matches!(check(period, "1d:now-1d"), Err(ParameterFault::Malformed { .. }));
        assert_matches!(check(period, "1d:now/"), Err(ParameterFault::Malformed { .. }));
        assert!(check(period, "1d:{$SHIFT}").is_ok());

        // plain seconds carry no precision, so the shift is not inspected
        assert!(check(period, "3600:anything").is_ok());
    }

    #[test]
    fn test_query() {
        assert!(check(required(ParameterKind::Query), "/host/key").is_ok());
        assert!(check(required(ParameterKind::Query), "host/key").is_err());
        let calculated = ParameterChecker::new(MacroMatcher::default(), QueryParser::new(true));
        let param = RawParameter::new("/*/key?[tag=\"a\"]");
        assert!(calculated.check(&required(ParameterKind::Query), &param).is_ok());
    }
}
