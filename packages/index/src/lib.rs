//! Statute index - Date-aware retrieval over consolidated statute editions.
//!
//! Chunks produced by `statute_harvester` are stored with the validity
//! window of their edition. Every read is answered for a date: only the
//! edition in force on that day is visible. On top of this the crate
//! rebuilds full sections from their chunks, lists the amending acts an
//! edition introduced and enumerates the stored editions.
//!
//! # Example
//!
//! ```
//! use statute_index::embedding::HashingEmbedder;
//! use statute_index::index::MemoryIndex;
//! use statute_index::store::TemporalStore;
//!
//! let store = TemporalStore::new(MemoryIndex::new(HashingEmbedder::default()));
//! assert!(store.changes("2020-07-15").unwrap().is_empty());
//! assert!(store.edition_ranges().unwrap().is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults and environment configuration
//! - [`error`]: Error types and Result alias
//! - [`metadata`]: Record metadata and filter predicates
//! - [`embedding`]: Text embedders
//! - [`index`]: Filterable vector index
//! - [`record`]: Chunk to index record mapping
//! - [`store`]: Date-aware store and consumer operations
//! - [`ranking`]: Grouping of search hits by section
//! - [`reassemble`]: Rebuilding sections from chunks
//! - [`changes`]: Amendment list parsing and diffing
//! - [`editions`]: Edition window listing
//! - [`ingest`]: Batch ingestion
//! - [`cli`]: Command-line interface

pub mod changes;
pub mod cli;
pub mod config;
pub mod editions;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingest;
pub mod metadata;
pub mod ranking;
pub mod reassemble;
pub mod record;
pub mod store;

// Re-export commonly used items
pub use changes::AmendmentEntry;
pub use config::IndexConfig;
pub use embedding::{Embedder, HashingEmbedder, OpenAiEmbedder};
pub use error::{IndexError, Result};
pub use index::{FilterableIndex, IndexRecord, MemoryIndex};
pub use ingest::{ingest_editions, IngestReport};
pub use metadata::{Metadata, MetadataValue, Predicate};
pub use reassemble::ReassembledDocument;
pub use store::{Lookup, StoreSettings, TemporalStore};
