//! Index configuration: defaults and environment overrides.

use std::path::PathBuf;

use crate::embedding::{Embedder, HashingEmbedder, OpenAiEmbedder};
use crate::error::{IndexError, Result};

/// Raw hits requested from the index per semantic search.
pub const DEFAULT_SEARCH_K: usize = 10;

/// Full documents returned per query after grouping.
pub const DEFAULT_TOP_K: usize = 3;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Dimensions of the offline hashing embedder.
pub const HASHING_DIMENSIONS: usize = 384;

/// Inputs per request to the embeddings endpoint.
pub const EMBEDDING_BATCH_SIZE: usize = 128;

/// Default snapshot file of the persisted index.
pub const DEFAULT_STORE_PATH: &str = "statute-index.json";

/// Which embedder backs the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedderKind {
    /// Deterministic feature hashing, no network.
    #[default]
    Hashing,
    /// OpenAI-compatible embeddings endpoint.
    OpenAi,
}

impl std::str::FromStr for EmbedderKind {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAi),
            other => Err(IndexError::Config(format!(
                "unknown embedder '{other}' (expected 'hashing' or 'openai')"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub store_path: PathBuf,
    pub embedder: EmbedderKind,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub top_k: usize,
    pub search_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            embedder: EmbedderKind::default(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            search_k: DEFAULT_SEARCH_K,
        }
    }
}

impl IndexConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let store_path = lookup("STATUTE_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let embedder = match lookup("STATUTE_EMBEDDER") {
            Some(value) => value.parse()?,
            None => defaults.embedder,
        };

        let top_k = lookup("STATUTE_TOP_K")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.top_k);

        let search_k = lookup("STATUTE_SEARCH_K")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.search_k);

        Ok(Self {
            store_path,
            embedder,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            embedding_model: lookup("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            top_k,
            search_k,
        })
    }

    #[must_use]
    pub fn with_store_path(mut self, store_path: impl Into<PathBuf>) -> Self {
        self.store_path = store_path.into();
        self
    }

    #[must_use]
    pub fn with_embedder(mut self, embedder: EmbedderKind) -> Self {
        self.embedder = embedder;
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Construct the configured embedder.
    ///
    /// # Errors
    /// Returns `Config` when the OpenAI embedder is selected without an API key.
    pub fn build_embedder(&self) -> Result<Box<dyn Embedder>> {
        match self.embedder {
            EmbedderKind::Hashing => Ok(Box::new(HashingEmbedder::new(HASHING_DIMENSIONS))),
            EmbedderKind::OpenAi => {
                let api_key = self
                    .openai_api_key
                    .as_deref()
                    .ok_or_else(|| IndexError::Config("OPENAI_API_KEY not set".into()))?;
                Ok(Box::new(OpenAiEmbedder::new(
                    api_key,
                    &self.openai_base_url,
                    &self.embedding_model,
                )?))
            }
        }
    }
}
