//! Batch ingestion of edition pages into the temporal store.

use serde::Serialize;
use statute_harvester::{harvest_edition, Chunker, EditionWindow, PageFetcher, SourceLayout};

use crate::error::Result;
use crate::index::FilterableIndex;
use crate::store::TemporalStore;

/// An edition written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionSummary {
    pub url: String,
    pub window: Option<EditionWindow>,
    pub sections: usize,
    pub chunks: usize,
}

/// An edition that could not be ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of an ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub succeeded: Vec<EditionSummary>,
    pub failed: Vec<IngestFailure>,
}

impl IngestReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    #[must_use]
    pub fn total_chunks(&self) -> usize {
        self.succeeded.iter().map(|s| s.chunks).sum()
    }
}

/// Fetch, decompose, chunk and store one edition.
pub fn ingest_edition<F, I>(
    fetcher: &F,
    layout: &SourceLayout,
    chunker: &Chunker,
    store: &mut TemporalStore<I>,
    url: &str,
) -> Result<EditionSummary>
where
    F: PageFetcher + ?Sized,
    I: FilterableIndex,
{
    let sections = harvest_edition(fetcher, layout, url)?;
    let chunks = chunker.chunk_all(&sections);
    let written = store.upsert(&chunks)?;

    let window = sections.first().map(|s| s.window);
    tracing::info!(url = %url, sections = sections.len(), chunks = written, "Ingested edition");

    Ok(EditionSummary {
        url: url.to_string(),
        window,
        sections: sections.len(),
        chunks: written,
    })
}

/// Ingest a batch of edition URLs.
///
/// Each edition is committed on its own. A failing URL is recorded in the
/// report and the batch moves on to the next one.
pub fn ingest_editions<F, I>(
    fetcher: &F,
    layout: &SourceLayout,
    chunker: &Chunker,
    store: &mut TemporalStore<I>,
    urls: &[String],
) -> IngestReport
where
    F: PageFetcher + ?Sized,
    I: FilterableIndex,
{
    let mut report = IngestReport::default();

    for url in urls {
        match ingest_edition(fetcher, layout, chunker, store, url) {
            Ok(summary) => report.succeeded.push(summary),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Skipping edition");
                report.failed.push(IngestFailure {
                    url: url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
