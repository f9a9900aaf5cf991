//! Error types for the harvester.
//!
//! Uses the dual-error pattern: `HarvesterError` for library consumers
//! with detailed error context, and specific error types for internal use.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2020-07-01)")]
    InvalidDate(String),

    /// Source URL does not look like an edition page.
    #[error("Invalid edition URL: '{0}'")]
    InvalidUrl(String),

    /// HTTP client could not be constructed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Fetching an edition page failed (timeout, network, non-success status).
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The root structural container is absent from the page.
    #[error("No '{selector}' container found in {url}")]
    StructureNotFound { selector: String, url: String },

    /// The preamble with the edition's validity window is missing or unreadable.
    #[error("No edition window found in {url}")]
    EditionWindowNotFound { url: String },

    /// A CSS selector in the source layout failed to parse.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvesterError::InvalidDate("2020-13-01".to_string());
        assert!(err.to_string().contains("2020-13-01"));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_structure_not_found_display() {
        let err = HarvesterError::StructureNotFound {
            selector: "div.WordSection1".to_string(),
            url: "https://e-seimas.lrs.lt/x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No 'div.WordSection1' container found in https://e-seimas.lrs.lt/x"
        );
    }

    #[test]
    fn test_edition_window_not_found_display() {
        let err = HarvesterError::EditionWindowNotFound {
            url: "https://e-seimas.lrs.lt/x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No edition window found in https://e-seimas.lrs.lt/x"
        );
    }
}
