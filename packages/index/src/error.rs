//! Error types for the statute index.

use std::path::PathBuf;

use statute_harvester::HarvesterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Harvester(#[from] HarvesterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("embedding request failed: {0}")]
    EmbeddingRequest(#[from] reqwest::Error),

    #[error("embedding API error (status {status}): {message}")]
    EmbeddingApi { status: u16, message: String },

    #[error("malformed embedding response: {0}")]
    EmbeddingResponse(String),

    #[error("index {} was built with embedder '{stored}', not '{current}'", path.display())]
    EmbedderMismatch {
        path: PathBuf,
        stored: String,
        current: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
