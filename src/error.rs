//! Error types for the recommendation core.
//!
//! The shell layers (CLI, storage, config) use `anyhow::Result` and wrap these
//! with context; the core itself only ever returns [`RecommendError`].

use thiserror::Error;

/// Result type for core recommendation operations
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Failures reported by the catalog and the tree-building core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// No album with the requested identity exists in the catalog
    #[error("Album not found: {0}")]
    AlbumNotFound(String),

    /// No genre with the requested name exists in the catalog
    #[error("Genre not found: {0}")]
    GenreNotFound(String),

    /// Negative depth, branching or cap supplied at an input boundary
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Catalog entries that break the album/genre invariants
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),
}

impl RecommendError {
    /// Whether this error means the requested root does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::AlbumNotFound(_) | Self::GenreNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(RecommendError::AlbumNotFound("x".to_string()).is_not_found());
        assert!(RecommendError::GenreNotFound("x".to_string()).is_not_found());
        assert!(!RecommendError::InvalidParameter("depth".to_string()).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = RecommendError::InvalidParameter("depth must not be negative (got -1)".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: depth must not be negative (got -1)");
    }
}
