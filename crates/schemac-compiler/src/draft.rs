//! # Draft Selection — Keyword Availability per Dialect
//!
//! The five supported dialects differ in which keywords exist and in two
//! spellings (`exclusiveMinimum` boolean vs. number, `dependencies` vs.
//! `dependentRequired`/`dependentSchemas`). Filters consult these
//! predicates at parse time; a keyword outside its draft fails
//! compilation with `CompileError::UnsupportedKeyword`.

use schemac_core::CompileError;

/// A JSON Schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Draft {
    /// Draft 4.
    V4,
    /// Draft 6.
    V6,
    /// Draft 7.
    V7,
    /// Draft 2019-09.
    V2019,
    /// Draft 2020-12 (the default).
    #[default]
    V2020,
}

impl Draft {
    /// Parse the option spelling (`"4"`, `"6"`, `"7"`, `"2019"`, `"2020"`).
    pub fn parse(s: &str) -> Result<Self, CompileError> {
        match s {
            "4" => Ok(Self::V4),
            "6" => Ok(Self::V6),
            "7" => Ok(Self::V7),
            "2019" => Ok(Self::V2019),
            "2020" => Ok(Self::V2020),
            other => Err(CompileError::InvalidOption(format!(
                "unknown draft {other:?} (expected \"4\", \"6\", \"7\", \"2019\", or \"2020\")"
            ))),
        }
    }

    /// The option spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "4",
            Self::V6 => "6",
            Self::V7 => "7",
            Self::V2019 => "2019",
            Self::V2020 => "2020",
        }
    }

    /// Draft 4 spells exclusive bounds as booleans that strengthen
    /// `minimum` / `maximum`.
    pub fn boolean_exclusive_bounds(self) -> bool {
        self == Self::V4
    }

    /// `const`, `contains`, `propertyNames`, and numeric exclusive bounds
    /// arrived in draft 6.
    pub fn has_const_and_contains(self) -> bool {
        self >= Self::V6
    }

    /// `if` / `then` / `else` arrived in draft 7.
    pub fn has_conditionals(self) -> bool {
        self >= Self::V7
    }

    /// `dependentRequired` / `dependentSchemas`, `minContains` /
    /// `maxContains`, and the `unevaluated*` keywords arrived in 2019-09,
    /// which also retired `dependencies`.
    pub fn has_dependent_keywords(self) -> bool {
        self >= Self::V2019
    }

    /// `prefixItems` arrived in 2020-12, which also retired positional
    /// `items` and `additionalItems`.
    pub fn has_prefix_items(self) -> bool {
        self >= Self::V2020
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_drafts() {
        assert_eq!(Draft::parse("4").unwrap(), Draft::V4);
        assert_eq!(Draft::parse("2020").unwrap(), Draft::V2020);
        assert!(Draft::parse("5").is_err());
        assert!(Draft::parse("2020-12").is_err());
    }

    #[test]
    fn test_ordering_tracks_publication() {
        assert!(Draft::V4 < Draft::V6);
        assert!(Draft::V7 < Draft::V2019);
        assert!(Draft::V2019 < Draft::V2020);
    }

    #[test]
    fn test_keyword_gates() {
        assert!(Draft::V4.boolean_exclusive_bounds());
        assert!(!Draft::V6.boolean_exclusive_bounds());
        assert!(!Draft::V4.has_const_and_contains());
        assert!(Draft::V6.has_const_and_contains());
        assert!(!Draft::V6.has_conditionals());
        assert!(Draft::V7.has_conditionals());
        assert!(!Draft::V7.has_dependent_keywords());
        assert!(Draft::V2019.has_dependent_keywords());
        assert!(!Draft::V2019.has_prefix_items());
        assert!(Draft::V2020.has_prefix_items());
    }
}
