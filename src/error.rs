//! Error types for credential lookups.

use thiserror::Error;

/// Result type alias using [`CredfetchError`].
pub type Result<T> = std::result::Result<T, CredfetchError>;

/// Errors that can occur while talking to a credential store.
///
/// The retrieval pipeline never hands these to its caller directly. Each one is
/// converted to its `Display` text and appended to the failure's error log.
#[derive(Debug, Error)]
pub enum CredfetchError {
    /// The store access capability is not loaded and could not be installed.
    #[error("credential store unavailable: {0}")]
    DependencyMissing(String),

    /// Credential type literal outside the supported set.
    #[error("invalid credential type '{0}' (expected one of GENERIC, DOMAIN_PASSWORD, DOMAIN_CERTIFICATE, DOMAIN_VISIBLE_PASSWORD, GENERIC_CERTIFICATE, DOMAIN_EXTENDED, MAXIMUM, MAXIMUM_EX)")]
    InvalidCredentialType(String),

    /// User name or target failed validation.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Store operation failed with context.
    #[error("{store}: {operation} {filter}: {source}")]
    StoreOperation {
        /// Store name
        store: String,
        /// Operation name (find_all, find_by_target, ...)
        operation: String,
        /// Rendered filter the operation ran with
        filter: String,
        /// Underlying error
        #[source]
        source: Box<CredfetchError>,
    },

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    CommandFailed(String),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error (catch-all).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CredfetchError {
    /// Wraps an underlying error with the store, operation and filter that
    /// produced it.
    ///
    /// # Example
    ///
    /// ```
    /// use credfetch::CredfetchError;
    ///
    /// let err = CredfetchError::CommandFailed("access denied".to_string());
    /// let wrapped = CredfetchError::store_op(
    ///     "wincred",
    ///     "find_by_target",
    ///     "target=www.example.com",
    ///     err,
    /// );
    ///
    /// assert_eq!(
    ///     wrapped.to_string(),
    ///     "wincred: find_by_target target=www.example.com: command execution failed: access denied"
    /// );
    /// ```
    pub fn store_op(
        store: impl Into<String>,
        operation: impl Into<String>,
        filter: impl Into<String>,
        err: CredfetchError,
    ) -> Self {
        Self::StoreOperation {
            store: store.into(),
            operation: operation.into(),
            filter: filter.into(),
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = CredfetchError::DependencyMissing("module not found".to_string());
        assert_eq!(
            err.to_string(),
            "credential store unavailable: module not found"
        );
    }

    #[test]
    fn test_invalid_type_lists_literals() {
        let err = CredfetchError::InvalidCredentialType("WEB".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'WEB'"));
        assert!(msg.contains("MAXIMUM_EX"));
    }

    #[test]
    fn test_store_operation_error_source_chain() {
        let inner = CredfetchError::CommandFailed("boom".to_string());
        let outer = CredfetchError::store_op("mock", "find_all", "all", inner);

        assert!(outer.to_string().starts_with("mock: find_all all"));
        assert!(outer.source().is_some());
    }
}
