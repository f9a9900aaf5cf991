//! Mapping between harvested chunks and index records.

use statute_harvester::config::BREADCRUMB_SEPARATOR;
use statute_harvester::{Chunk, ChunkBoundary, EditionWindow};

use crate::error::{IndexError, Result};
use crate::index::IndexRecord;
use crate::metadata::{Metadata, MetadataValue};

/// Metadata field names written for every chunk.
pub mod fields {
    pub const REFERENCE: &str = "reference";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const BREADCRUMB: &str = "breadcrumb";
    pub const ARTICLE_NO: &str = "article_no";
    pub const EFFECTIVE_FROM: &str = "effective_from";
    pub const EFFECTIVE_TO: &str = "effective_to";
    pub const CHUNK_NUMBER: &str = "chunk_number";
    pub const CHUNK_TOTAL: &str = "chunk_total";
    pub const IS_LAST: &str = "is_last";
    pub const PREFIX_LEN: &str = "prefix_len";
    pub const OFFSET: &str = "offset";
}

/// Flatten a chunk's descriptive fields into index metadata.
///
/// The breadcrumb is stored joined with ` > `; an absent article number is
/// left out rather than stored empty.
#[must_use]
pub fn chunk_metadata(chunk: &Chunk) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(fields::REFERENCE.into(), chunk.reference.as_str().into());
    metadata.insert(fields::URL.into(), chunk.url.as_str().into());
    metadata.insert(fields::TITLE.into(), chunk.title.as_str().into());
    metadata.insert(
        fields::BREADCRUMB.into(),
        chunk.breadcrumb.join(BREADCRUMB_SEPARATOR).into(),
    );
    if let Some(article_no) = &chunk.article_no {
        metadata.insert(fields::ARTICLE_NO.into(), article_no.as_str().into());
    }
    metadata.insert(fields::EFFECTIVE_FROM.into(), chunk.window.effective_from.into());
    metadata.insert(fields::EFFECTIVE_TO.into(), chunk.window.effective_to.into());
    metadata.insert(fields::CHUNK_NUMBER.into(), chunk.chunk_number.into());
    metadata.insert(fields::CHUNK_TOTAL.into(), chunk.chunk_total.into());
    metadata.insert(fields::IS_LAST.into(), chunk.is_last.into());
    if let Some(boundary) = chunk.boundary {
        metadata.insert(fields::PREFIX_LEN.into(), boundary.prefix_len.into());
        metadata.insert(fields::OFFSET.into(), boundary.offset.into());
    }
    metadata
}

fn required_str(metadata: &Metadata, field: &str) -> Result<String> {
    metadata
        .get(field)
        .and_then(MetadataValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| IndexError::InvalidInput(format!("record lacks string field '{field}'")))
}

fn required_int<T: TryFrom<i64>>(metadata: &Metadata, field: &str) -> Result<T> {
    metadata
        .get(field)
        .and_then(MetadataValue::as_int)
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| IndexError::InvalidInput(format!("record lacks integer field '{field}'")))
}

fn optional_int<T: TryFrom<i64>>(metadata: &Metadata, field: &str) -> Option<T> {
    metadata
        .get(field)
        .and_then(MetadataValue::as_int)
        .and_then(|v| T::try_from(v).ok())
}

/// Rebuild a chunk from a stored record.
///
/// Records without both boundary fields yield a chunk without a
/// [`ChunkBoundary`].
///
/// # Errors
/// Returns `InvalidInput` when a required field is missing or mistyped.
pub fn chunk_from_record(record: &IndexRecord) -> Result<Chunk> {
    let m = &record.metadata;

    let breadcrumb = required_str(m, fields::BREADCRUMB)?
        .split(BREADCRUMB_SEPARATOR)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    let boundary = match (
        optional_int(m, fields::PREFIX_LEN),
        optional_int(m, fields::OFFSET),
    ) {
        (Some(prefix_len), Some(offset)) => Some(ChunkBoundary { prefix_len, offset }),
        _ => None,
    };

    let window = EditionWindow::new(
        required_int(m, fields::EFFECTIVE_FROM)?,
        required_int(m, fields::EFFECTIVE_TO)?,
    )?;

    Ok(Chunk {
        reference: required_str(m, fields::REFERENCE)?,
        url: required_str(m, fields::URL)?,
        title: required_str(m, fields::TITLE)?,
        breadcrumb,
        article_no: m
            .get(fields::ARTICLE_NO)
            .and_then(MetadataValue::as_str)
            .map(str::to_string),
        window,
        chunk_number: required_int(m, fields::CHUNK_NUMBER)?,
        chunk_total: required_int(m, fields::CHUNK_TOTAL)?,
        is_last: m
            .get(fields::IS_LAST)
            .and_then(MetadataValue::as_bool)
            .unwrap_or(false),
        text: record.document.clone(),
        boundary,
    })
}

/// Split chunks into the parallel slices taken by `FilterableIndex::upsert`.
#[must_use]
pub fn to_upsert_batch(chunks: &[Chunk]) -> (Vec<String>, Vec<String>, Vec<Metadata>) {
    let ids = chunks.iter().map(Chunk::id).collect();
    let documents = chunks.iter().map(|c| c.text.clone()).collect();
    let metadatas = chunks.iter().map(chunk_metadata).collect();
    (ids, documents, metadatas)
}
