use std::fmt;

use serde::{Deserialize, Serialize};

use cmt_error::CmtError;

/// A normalized module name: non-empty, first character uppercase
/// ASCII, remaining characters in `[A-Za-z0-9_']`.
///
/// Comparisons between module names are case-sensitive on the
/// normalized form. All names passing through [`ModuleName::parse`]
/// or [`ModuleName::normalize`] have already had their first
/// character uppercased; the rest of the string is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Normalizes `raw` (uppercasing its first character) and
    /// validates the result, returning an error if it is not a valid
    /// module name.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CmtError> {
        let normalized = Self::normalize_str(raw.as_ref());
        if Self::is_valid(&normalized) {
            Ok(ModuleName(normalized))
        } else {
            Err(CmtError::InvalidModuleName(raw.as_ref().to_string()))
        }
    }

    /// Uppercases the first character of `raw`, leaving the rest
    /// unchanged. Does not validate; use [`ModuleName::parse`] when
    /// the input must be checked.
    pub fn normalize_str(raw: &str) -> String {
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against the stdlib/internal
    /// classification list.
    pub fn is_stdlib(&self) -> bool {
        crate::stdlib::is_stdlib_name(&self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_first_char_only() {
        let m = ModuleName::parse("math").unwrap();
        assert_eq!(m.as_str(), "Math");
        let m = ModuleName::parse("mATH").unwrap();
        assert_eq!(m.as_str(), "MATH");
    }

    #[test]
    fn rejects_empty() {
        assert!(ModuleName::parse("").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(ModuleName::parse("Math-Utils").is_err());
        assert!(ModuleName::parse("Math.Utils").is_err());
    }

    #[test]
    fn accepts_apostrophe_and_digits() {
        assert!(ModuleName::parse("Foo_Bar'2").is_ok());
    }

    #[test]
    fn stdlib_classification_is_case_insensitive() {
        let m = ModuleName::parse("belt").unwrap();
        assert!(m.is_stdlib());
        let m = ModuleName::parse("BELT").unwrap();
        assert!(m.is_stdlib());
    }

    #[test]
    fn stdlib_prefix_match() {
        let m = ModuleName::parse("Js_array").unwrap();
        assert!(m.is_stdlib());
        let m = ModuleName::parse("Caml_option").unwrap();
        assert!(m.is_stdlib());
    }
}
