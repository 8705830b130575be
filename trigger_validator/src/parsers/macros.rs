//! User macro, LLD macro and LLD macro function recognition

use super::pattern::StaticPattern;

macro_rules! user_macro {
    () => {
        r#"\{\$[A-Z0-9_.]+(?::[ ]*(?:regex:[ ]*)?(?:"(?:[^"\\]|\\.)*"[ ]*|[^"}][^}]*)?)?\}"#
    };
}

macro_rules! lld_macro {
    () => {
        r"\{#[A-Z0-9_.]+\}"
    };
}

macro_rules! lld_macro_function {
    () => {
        concat!(
            r"\{",
            lld_macro!(),
            r#"\.[a-z]+\([ ]*(?:"(?:[^"\\]|\\.)*"|[^,")]*)[ ]*(?:,[ ]*(?:"(?:[^"\\]|\\.)*"|[^,")]*)[ ]*)*\)\}"#
        )
    };
}

static USER_MACRO: StaticPattern = StaticPattern::new(concat!("^", user_macro!(), "$"));
static LLD_MACRO: StaticPattern = StaticPattern::new(concat!("^", lld_macro!(), "$"));
static LLD_MACRO_FUNCTION: StaticPattern =
    StaticPattern::new(concat!("^", lld_macro_function!(), "$"));

static ANY_USER_MACRO: StaticPattern = StaticPattern::new(user_macro!());
static ANY_LLD_MACRO: StaticPattern =
    StaticPattern::new(concat!(lld_macro_function!(), "|", lld_macro!()));

/// `{$NAME}`, `{$NAME:context}` or `{$NAME:regex:"context"}`
pub fn is_user_macro(text: &str) -> bool {
    USER_MACRO.is_match(text)
}

/// `{#NAME}`
pub fn is_lld_macro(text: &str) -> bool {
    LLD_MACRO.is_match(text)
}

/// `{{#NAME}.func(params)}`
pub fn is_lld_macro_function(text: &str) -> bool {
    LLD_MACRO_FUNCTION.is_match(text)
}

/// Decides which macro forms count as a macro for a validator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroMatcher {
    lld_macros: bool,
}

impl Default for MacroMatcher {
    fn default() -> Self {
        Self { lld_macros: true }
    }
}

impl MacroMatcher {
    pub fn new(lld_macros: bool) -> Self {
        Self { lld_macros }
    }

    pub fn lld_macros_enabled(&self) -> bool {
        self.lld_macros
    }

    /// True when the whole text is one macro
    pub fn is_macro(&self, text: &str) -> bool {
        is_user_macro(text)
            || (self.lld_macros && (is_lld_macro_function(text) || is_lld_macro(text)))
    }

    /// True when a macro occurs anywhere in the text
    pub fn contains_macro(&self, text: &str) -> bool {
        !self.macro_ranges(text).is_empty()
    }

    /// Byte ranges of the macros found in the text, ordered by start
    pub fn macro_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = ANY_USER_MACRO.find_ranges(text);
        if self.lld_macros {
            ranges.extend(ANY_LLD_MACRO.find_ranges(text));
            ranges.sort_unstable();
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_macros() {
        assert!(is_user_macro("{$MACRO}"));
        assert!(is_user_macro("{$A.B_1}"));
        assert!(is_user_macro("{$MACRO:ctx}"));
        assert!(is_user_macro("{$MACRO: \"quoted } ctx\"}"));
        assert!(is_user_macro("{$MACRO:regex:\"^a.*\"}"));
        assert!(!is_user_macro("{$lower}"));
        assert!(!is_user_macro("{$MACRO"));
        assert!(!is_user_macro("x{$MACRO}"));
        assert!(!is_user_macro("{#LLD}"));
    }

    #[test]
    fn test_lld_macros() {
        assert!(is_lld_macro("{#IFNAME}"));
        assert!(!is_lld_macro("{#ifname}"));
        assert!(is_lld_macro_function("{{#IFNAME}.regsub(\"(.*)_\", \\1)}"));
        assert!(is_lld_macro_function("{{#A}.iregsub()}"));
        assert!(!is_lld_macro_function("{{#A}.regsub(}"));
    }

    #[test]
    fn test_lld_option() {
        let with_lld = MacroMatcher::default();
        let without_lld = MacroMatcher::new(false);

        assert!(with_lld.is_macro("{#ITEM}"));
        assert!(!without_lld.is_macro("{#ITEM}"));
        assert!(without_lld.is_macro("{$ITEM}"));
        assert!(!without_lld.is_macro("{{#A}.regsub(x)}"));
    }

    #[test]
    fn test_contains_macro() {
        let matcher = MacroMatcher::default();
        assert!(matcher.contains_macro("now-{$SHIFT}"));
        assert!(matcher.contains_macro("{#N}h"));
        assert!(!MacroMatcher::new(false).contains_macro("{#N}h"));
        assert!(!matcher.contains_macro("5m"));
        assert_eq!(matcher.macro_ranges("1{$A:x}2"), vec![(1, 7)]);
    }
}
