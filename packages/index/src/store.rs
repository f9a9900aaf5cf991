//! Date-aware storage and retrieval of statute chunks.

use std::collections::BTreeMap;

use statute_harvester::config::AMENDMENT_MARKER_TITLE;
use statute_harvester::layout::canonical_article_no;
use statute_harvester::window::{date_key, format_date_key, previous_day};
use statute_harvester::{Chunk, EditionWindow};

use crate::changes::{incremental_changes, tail_amendments, AmendmentEntry};
use crate::config::{IndexConfig, DEFAULT_SEARCH_K, DEFAULT_TOP_K};
use crate::editions::edition_windows;
use crate::error::Result;
use crate::index::FilterableIndex;
use crate::metadata::{MetadataValue, Predicate};
use crate::ranking::select_top_references;
use crate::reassemble::{reassemble, ReassembledDocument};
use crate::record::{chunk_from_record, fields, to_upsert_batch};

/// Retrieval sizes of a [`TemporalStore`].
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Raw hits requested per semantic search.
    pub search_k: usize,

    /// References returned per query.
    pub top_k: usize,

    /// Title of the amendment-list section.
    pub amendment_marker: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            search_k: DEFAULT_SEARCH_K,
            top_k: DEFAULT_TOP_K,
            amendment_marker: AMENDMENT_MARKER_TITLE.to_string(),
        }
    }
}

impl From<&IndexConfig> for StoreSettings {
    fn from(config: &IndexConfig) -> Self {
        Self {
            search_k: config.search_k,
            top_k: config.top_k,
            ..Self::default()
        }
    }
}

/// Structural selectors for exact lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// All chunks of one section.
    Reference(String),
    /// Chunks of an article, by number in any accepted spelling.
    ArticleNo(String),
    /// Chunks of the amendment list.
    AmendmentMarker,
}

/// Chunk store answering every question for a given date.
///
/// Each chunk carries the window of the edition it came from, so filtering
/// on `effective_from <= date <= effective_to` selects exactly one edition
/// of every section.
pub struct TemporalStore<I: FilterableIndex> {
    index: I,
    settings: StoreSettings,
}

impl<I: FilterableIndex> TemporalStore<I> {
    pub fn new(index: I) -> Self {
        Self::with_settings(index, StoreSettings::default())
    }

    pub fn with_settings(index: I, settings: StoreSettings) -> Self {
        Self { index, settings }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn into_index(self) -> I {
        self.index
    }

    /// Write the chunks of one edition and commit.
    ///
    /// Chunks are keyed by `reference-chunk_number`, so writing the same
    /// edition again replaces its chunks instead of duplicating them. Chunks
    /// of a written reference numbered past its new `chunk_total` are removed.
    ///
    /// # Returns
    /// The number of chunks written
    pub fn upsert(&mut self, chunks: &[Chunk]) -> Result<usize> {
        let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
        for chunk in chunks {
            totals.insert(chunk.reference.as_str(), chunk.chunk_total);
        }
        for (reference, total) in totals {
            let stale = Predicate::field_eq(fields::REFERENCE, reference)
                .and(Predicate::field_gte(fields::CHUNK_NUMBER, total + 1));
            let removed = self.index.delete(&stale)?;
            if removed > 0 {
                tracing::debug!(reference, removed, "Removed chunks past the new chunk total");
            }
        }

        let (ids, documents, metadatas) = to_upsert_batch(chunks);
        self.index.upsert(&ids, &documents, &metadatas)?;
        self.index.commit()?;
        Ok(chunks.len())
    }

    fn date_filter(date: u32) -> Predicate {
        Predicate::field_lte(fields::EFFECTIVE_FROM, date)
            .and(Predicate::field_gte(fields::EFFECTIVE_TO, date))
    }

    fn marker_filter(&self) -> Predicate {
        Predicate::field_eq(fields::TITLE, self.settings.amendment_marker.as_str())
    }

    /// Semantic search over the sections in force on `date`.
    ///
    /// The amendment list is excluded. Returns up to `search_k` chunks with
    /// their distances, nearest first.
    pub fn search(&self, query: &str, date: &str) -> Result<Vec<(Chunk, f32)>> {
        self.search_on(query, date_key(date)?)
    }

    fn search_on(&self, query: &str, date: u32) -> Result<Vec<(Chunk, f32)>> {
        let filter = Self::date_filter(date).and(Predicate::field_ne(
            fields::TITLE,
            self.settings.amendment_marker.as_str(),
        ));
        self.index
            .search_with_scores(query, self.settings.search_k, &filter)?
            .iter()
            .map(|(record, distance)| Ok((chunk_from_record(record)?, *distance)))
            .collect()
    }

    /// Exact structural lookup among the chunks in force on `date`.
    ///
    /// Results are sorted by reference, then chunk number.
    pub fn lookup(&self, lookup: &Lookup, date: &str) -> Result<Vec<Chunk>> {
        self.lookup_on(lookup, date_key(date)?)
    }

    fn lookup_on(&self, lookup: &Lookup, date: u32) -> Result<Vec<Chunk>> {
        let selector = match lookup {
            Lookup::Reference(reference) => Predicate::field_eq(fields::REFERENCE, reference.as_str()),
            Lookup::ArticleNo(article_no) => {
                Predicate::field_eq(fields::ARTICLE_NO, canonical_article_no(article_no))
            }
            Lookup::AmendmentMarker => self.marker_filter(),
        };

        let mut chunks = self
            .index
            .get(&selector.and(Self::date_filter(date)))?
            .iter()
            .map(chunk_from_record)
            .collect::<Result<Vec<_>>>()?;
        chunks.sort_by(|a, b| {
            a.reference
                .cmp(&b.reference)
                .then(a.chunk_number.cmp(&b.chunk_number))
        });

        tracing::debug!(?lookup, date = %format_date_key(date), chunks = chunks.len(), "Lookup");
        Ok(chunks)
    }

    /// Full sections most relevant to `query` on `date`.
    ///
    /// Raw hits are grouped by section and the `top_k` strongest sections
    /// are rebuilt from all of their chunks.
    pub fn query(&self, query: &str, date: &str) -> Result<Vec<ReassembledDocument>> {
        let date = date_key(date)?;
        let hits: Vec<(String, f32)> = self
            .search_on(query, date)?
            .into_iter()
            .map(|(chunk, distance)| (chunk.reference, distance))
            .collect();

        let mut documents = Vec::new();
        for reference in select_top_references(&hits, self.settings.top_k) {
            let chunks = self.lookup_on(&Lookup::Reference(reference), date)?;
            documents.extend(reassemble(&chunks));
        }
        Ok(documents)
    }

    /// The complete text of an article as in force on `date`.
    ///
    /// `None` when no such article exists in that edition.
    pub fn full_section(&self, article_no: &str, date: &str) -> Result<Option<ReassembledDocument>> {
        let chunks = self.lookup(&Lookup::ArticleNo(article_no.to_string()), date)?;
        let chunks = single_reference(chunks, "article");
        Ok(reassemble(&chunks))
    }

    /// Amending acts introduced by the edition in force on `date`.
    ///
    /// These are the entries of that edition's amendment list numbered
    /// above every entry of the preceding edition (the one in force the day
    /// before). Without a preceding edition the result is empty.
    pub fn changes(&self, date: &str) -> Result<Vec<AmendmentEntry>> {
        let date = date_key(date)?;

        let current = single_reference(
            self.lookup_on(&Lookup::AmendmentMarker, date)?,
            "amendment list",
        );
        let Some(window) = current.first().map(|c| c.window) else {
            tracing::debug!(date = %format_date_key(date), "No edition in force");
            return Ok(Vec::new());
        };

        let previous = match previous_day(window.effective_from) {
            Some(day) => single_reference(
                self.lookup_on(&Lookup::AmendmentMarker, day)?,
                "amendment list",
            ),
            None => Vec::new(),
        };
        if previous.is_empty() {
            tracing::debug!(edition = %window, "No preceding edition, reporting no changes");
            return Ok(Vec::new());
        }

        Ok(incremental_changes(
            &tail_amendments(&current),
            &tail_amendments(&previous),
        ))
    }

    /// Validity windows of all stored editions, oldest first.
    pub fn edition_ranges(&self) -> Result<Vec<EditionWindow>> {
        let filter = self
            .marker_filter()
            .and(Predicate::field_eq(fields::CHUNK_NUMBER, MetadataValue::Int(1)));
        let chunks = self
            .index
            .get(&filter)?
            .iter()
            .map(chunk_from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(edition_windows(&chunks))
    }
}

/// Keep the chunks of the first reference in sorted lookup output.
fn single_reference(chunks: Vec<Chunk>, what: &str) -> Vec<Chunk> {
    let Some(first) = chunks.first().map(|c| c.reference.clone()) else {
        return chunks;
    };
    let total = chunks.len();
    let kept: Vec<Chunk> = chunks.into_iter().filter(|c| c.reference == first).collect();
    if kept.len() < total {
        tracing::warn!(reference = %first, what, "Several sections match, using the first");
    }
    kept
}
