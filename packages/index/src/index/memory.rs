use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{FilterableIndex, IndexRecord};
use crate::embedding::{cosine_distance, Embedder};
use crate::error::{IndexError, Result};
use crate::metadata::{Metadata, Predicate};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    id: String,
    document: String,
    metadata: Metadata,
    embedding: Vec<f32>,
}

impl StoredRecord {
    fn to_record(&self) -> IndexRecord {
        IndexRecord {
            id: self.id.clone(),
            document: self.document.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    embedder: String,
    records: Vec<StoredRecord>,
}

/// In-memory index scored by cosine distance, optionally backed by a JSON
/// snapshot file.
///
/// Records keep their first insertion position when replaced, so results
/// that tie on distance come back in insertion order.
pub struct MemoryIndex<E: Embedder> {
    embedder: E,
    records: Vec<StoredRecord>,
    positions: HashMap<String, usize>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl<E: Embedder> MemoryIndex<E> {
    /// Create an empty, unpersisted index.
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            records: Vec::new(),
            positions: HashMap::new(),
            path: None,
            dirty: false,
        }
    }

    /// Open the index persisted at `path`, or start an empty one there.
    ///
    /// # Errors
    /// Returns `EmbedderMismatch` when the snapshot was written with a
    /// different embedder, since its vectors would not be comparable.
    pub fn open(path: impl Into<PathBuf>, embedder: E) -> Result<Self> {
        let path = path.into();
        let mut index = Self::new(embedder);

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&content)?;
            let current = index.embedder.name();
            if snapshot.embedder != current {
                return Err(IndexError::EmbedderMismatch {
                    path,
                    stored: snapshot.embedder,
                    current,
                });
            }
            for record in snapshot.records {
                index.insert(record);
            }
            tracing::debug!(path = %path.display(), records = index.records.len(), "Loaded index snapshot");
        }

        index.path = Some(path);
        Ok(index)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    fn insert(&mut self, record: StoredRecord) {
        match self.positions.get(&record.id) {
            Some(&position) => self.records[position] = record,
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let snapshot = Snapshot {
            embedder: self.embedder.name(),
            records: self.records.clone(),
        };
        let content = serde_json::to_string(&snapshot)?;
        let temp_file = path.with_extension("json.tmp");

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&temp_file, path)?;
        Ok(())
    }
}

impl<E: Embedder> FilterableIndex for MemoryIndex<E> {
    fn upsert(
        &mut self,
        ids: &[String],
        documents: &[String],
        metadatas: &[Metadata],
    ) -> Result<()> {
        if ids.len() != documents.len() || ids.len() != metadatas.len() {
            return Err(IndexError::InvalidInput(format!(
                "upsert of {} ids with {} documents and {} metadata entries",
                ids.len(),
                documents.len(),
                metadatas.len()
            )));
        }
        if ids.is_empty() {
            return Ok(());
        }

        // Embed the whole batch before touching any record.
        let embeddings = self.embedder.embed(documents)?;
        if embeddings.len() != documents.len() {
            return Err(IndexError::EmbeddingResponse(format!(
                "{} embeddings for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        for (((id, document), metadata), embedding) in
            ids.iter().zip(documents).zip(metadatas).zip(embeddings)
        {
            self.insert(StoredRecord {
                id: id.clone(),
                document: document.clone(),
                metadata: metadata.clone(),
                embedding,
            });
        }
        self.dirty = true;
        Ok(())
    }

    fn get(&self, filter: &Predicate) -> Result<Vec<IndexRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(&r.metadata))
            .map(StoredRecord::to_record)
            .collect())
    }

    fn search_with_scores(
        &self,
        query: &str,
        k: usize,
        filter: &Predicate,
    ) -> Result<Vec<(IndexRecord, f32)>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let query = self.embedder.embed_query(query)?;

        let mut scored: Vec<(&StoredRecord, f32)> = self
            .records
            .iter()
            .filter(|r| filter.matches(&r.metadata))
            .map(|r| (r, cosine_distance(&query, &r.embedding)))
            .collect();
        // Stable sort keeps insertion order among equal distances.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(r, distance)| (r.to_record(), distance))
            .collect())
    }

    fn delete(&mut self, filter: &Predicate) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| !filter.matches(&r.metadata));
        let removed = before - self.records.len();
        if removed > 0 {
            self.positions = self
                .records
                .iter()
                .enumerate()
                .map(|(position, r)| (r.id.clone(), position))
                .collect();
            self.dirty = true;
        }
        Ok(removed)
    }

    fn commit(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            self.save(path)?;
            tracing::debug!(path = %path.display(), records = self.records.len(), "Saved index snapshot");
        }
        self.dirty = false;
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
