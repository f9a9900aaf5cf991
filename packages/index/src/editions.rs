//! Listing the editions present in the index.

use std::collections::BTreeSet;

use statute_harvester::{Chunk, EditionWindow};

/// Distinct edition windows of the given amendment-list chunks, ordered by
/// `effective_from`.
///
/// Every edition carries exactly one amendment list, so its first chunk
/// identifies the edition; other chunks are ignored.
#[must_use]
pub fn edition_windows(marker_chunks: &[Chunk]) -> Vec<EditionWindow> {
    marker_chunks
        .iter()
        .filter(|c| c.chunk_number == 1 && c.is_amendment_list())
        .map(|c| c.window)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
