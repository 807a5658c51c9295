//! Report error taxonomy.

use geodash_core::ident::IdentifierError;

/// Errors surfaced by the report functions.
///
/// Both variants are reported to the caller as request failures with a
/// description. Per-category lookup failures and per-row geometry
/// failures never reach this type — they are isolated at their source and
/// degrade to empty results.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A configured table or column name failed identifier validation.
    /// Indicates a deployment misconfiguration; raised before any query
    /// executes.
    #[error("invalid report configuration: {0}")]
    InvalidConfig(String),

    /// The underlying database rejected or failed the query.
    #[error("query failed: {0}")]
    QueryFailure(#[from] anyhow::Error),
}

impl From<IdentifierError> for ReportError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodash_core::ident::safe_identifier;

    #[test]
    fn identifier_error_maps_to_invalid_config() {
        let err: ReportError = safe_identifier("bad name").unwrap_err().into();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn query_failure_wraps_anyhow() {
        let err: ReportError = anyhow::anyhow!("connection refused").into();
        assert!(err.to_string().contains("connection refused"));
    }
}
