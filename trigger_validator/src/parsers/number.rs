//! Decimal numbers with an optional magnitude suffix (`10.2G`, `-3h`, `1e3`)

use super::pattern::StaticPattern;

static NUMBER_WITH_SUFFIX: StaticPattern =
    StaticPattern::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[KMGTsmhdw]?$");

static NUMBER: StaticPattern =
    StaticPattern::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$");

/// Full match of a number, optionally followed by one of `KMGT` or `smhdw`
pub fn is_number(text: &str, with_suffix: bool) -> bool {
    if with_suffix {
        NUMBER_WITH_SUFFIX.is_match(text)
    } else {
        NUMBER.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        for ok in ["0", "1", "-3", "10.2", "1.", ".5", "1e3", "-2.5E-2"] {
            assert!(is_number(ok, false), "{}", ok);
        }
        for bad in ["", ".", "-", "1..2", "1e", "5K", "abc", "1 "] {
            assert!(!is_number(bad, false), "{}", bad);
        }
    }

    #[test]
    fn test_suffixes() {
        for ok in ["5w", "-3h", "10.2G", "1T", "7s"] {
            assert!(is_number(ok, true), "{}", ok);
        }
        for bad in ["5y", "5M5", "1KB", "G"] {
            assert!(!is_number(bad, true), "{}", bad);
        }
    }
}
