//! SQL identifier validation.
//!
//! Table and column names arrive from deployment configuration, not from
//! request input, but they are still interpolated into SQL text. This gate
//! is the sole injection defense for identifiers: every configured name
//! must pass through [`safe_identifier`] before it touches a query string.
//! Filter *values* never go through here — they travel as bound parameters.

use std::sync::LazyLock;

use regex::Regex;

/// Letters or underscore first, then alphanumerics, underscore, or dot.
/// The dot admits schema-qualified names like `reporting.dimensiones`.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("identifier regex compiles"));

/// A configured table or column name failed the identifier-safety check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0}")]
pub struct IdentifierError(pub String);

/// Validates a configured table or column name for safe SQL interpolation.
///
/// Returns the input unchanged when it matches
/// `^[A-Za-z_][A-Za-z0-9_.]*$`.
///
/// # Errors
///
/// Returns [`IdentifierError`] when the name contains any character outside
/// `[A-Za-z0-9_.]` or does not start with a letter or underscore.
pub fn safe_identifier(name: &str) -> Result<&str, IdentifierError> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(name)
    } else {
        Err(IdentifierError(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["dimensiones", "latitud", "_private", "Dim2", "a"] {
            assert_eq!(safe_identifier(name), Ok(name));
        }
    }

    #[test]
    fn accepts_qualified_names() {
        assert_eq!(
            safe_identifier("reporting.dimensiones"),
            Ok("reporting.dimensiones")
        );
    }

    #[test]
    fn rejects_empty_string() {
        assert!(safe_identifier("").is_err());
    }

    #[test]
    fn rejects_leading_digit_or_dot() {
        assert!(safe_identifier("1table").is_err());
        assert!(safe_identifier(".table").is_err());
    }

    #[test]
    fn rejects_injection_attempts() {
        for name in [
            "tbl; DROP TABLE x",
            "tbl--",
            "tbl'",
            "tbl\"",
            "tbl name",
            "tbl)",
        ] {
            assert!(safe_identifier(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(safe_identifier("señal").is_err());
    }

    #[test]
    fn error_carries_offending_name() {
        let err = safe_identifier("bad name").unwrap_err();
        assert_eq!(err, IdentifierError("bad name".to_string()));
    }
}
