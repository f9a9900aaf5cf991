//! Statute harvester - Split consolidated statute editions into dated sections.
//!
//! This crate fetches consolidated editions of a statute from the e-seimas
//! portal, decomposes each edition page into addressable section documents
//! that share the edition's validity window, and splits those sections into
//! bounded, overlapping chunks ready for indexing.
//!
//! # Example
//!
//! ```
//! use statute_harvester::config;
//! use statute_harvester::window::EditionWindow;
//!
//! assert!(config::validate_date("2020-07-01").is_ok());
//!
//! let window = EditionWindow::parse("2020-07-01", None).unwrap();
//! assert!(window.contains(20250101));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`window`]: Edition validity windows and integer date keys
//! - [`types`]: Core data types (SectionDocument, Chunk)
//! - [`error`]: Error types and Result alias
//! - [`http`]: Page fetching
//! - [`layout`]: Markup conventions of the portal
//! - [`html`]: HTML utilities
//! - [`registry`]: Extensible inline element rendering
//! - [`decompose`]: Structural decomposition into sections
//! - [`chunker`]: Size-bounded chunking
//! - [`dump`]: YAML output for inspection
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod chunker;
pub mod cli;
pub mod config;
pub mod decompose;
pub mod dump;
pub mod error;
pub mod harvester;
pub mod html;
pub mod http;
pub mod layout;
pub mod registry;
pub mod types;
pub mod window;

// Re-export main functions
pub use harvester::{fetch_statute_text, harvest_edition, parse_edition};

// Re-export commonly used items
pub use chunker::Chunker;
pub use config::{validate_date, validate_url};
pub use error::{HarvesterError, Result};
pub use http::{HttpFetcher, PageFetcher};
pub use layout::SourceLayout;
pub use types::{Chunk, ChunkBoundary, SectionDocument};
pub use window::EditionWindow;
