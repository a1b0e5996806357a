//! Error types for document loading and name resolution.
//!
//! A query that matches nothing is not an error: see
//! [`Resolution`](crate::resolve::Resolution).

/// Result type for docscout core operations.
pub type DocResult<T> = Result<T, DocError>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// Caller supplied an unusable argument (e.g. an empty query).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No document exists at the requested locator.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Locator points outside the document store.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocError {
    /// Check if this error was caused by the caller rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::DocumentNotFound(_) | Self::InvalidLocator(_)
        )
    }
}

/// Reject empty or whitespace-only queries before they reach the resolver.
pub fn validate_query(query: &str) -> DocResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(DocError::InvalidInput(
            "name must be a non-empty string".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  s3 bucket ").unwrap(), "s3 bucket");
        assert!(matches!(validate_query(""), Err(DocError::InvalidInput(_))));
        assert!(matches!(validate_query(" \t\n"), Err(DocError::InvalidInput(_))));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(DocError::InvalidInput("x".into()).is_user_error());
        assert!(DocError::InvalidLocator("../etc".into()).is_user_error());
        let io = DocError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_user_error());
        assert_eq!(io.to_string(), "I/O error: disk");
    }
}
