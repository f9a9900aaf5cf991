//! Filterable vector index.
//!
//! The temporal store only relies on [`FilterableIndex`]; [`MemoryIndex`]
//! is the bundled implementation.

mod memory;

pub use memory::MemoryIndex;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metadata::{Metadata, Predicate};

/// A stored document with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub document: String,
    pub metadata: Metadata,
}

/// A vector index whose records can be filtered by metadata.
pub trait FilterableIndex {
    /// Insert or replace records by id.
    ///
    /// The three slices are parallel; their lengths must match.
    fn upsert(&mut self, ids: &[String], documents: &[String], metadatas: &[Metadata])
        -> Result<()>;

    /// All records matching `filter`, in insertion order.
    fn get(&self, filter: &Predicate) -> Result<Vec<IndexRecord>>;

    /// The `k` records matching `filter` nearest to `query`.
    ///
    /// Scores are distances: lower means more relevant.
    fn search_with_scores(
        &self,
        query: &str,
        k: usize,
        filter: &Predicate,
    ) -> Result<Vec<(IndexRecord, f32)>>;

    /// Remove every record matching `filter`.
    ///
    /// # Returns
    /// The number of records removed
    fn delete(&mut self, filter: &Predicate) -> Result<usize>;

    /// Make preceding writes durable.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
