//! Core data types for harvested statute editions.

use serde::{Deserialize, Serialize};

use crate::config::{AMENDMENT_MARKER_TITLE, BREADCRUMB_SEPARATOR};
use crate::window::EditionWindow;

/// Render a breadcrumb and a title as one line: `a > b > title`.
///
/// Empty parts are left out and embedded newlines become spaces, so the
/// result is always a single line.
///
/// # Examples
/// ```
/// use statute_harvester::types::context_line;
///
/// let crumbs = vec!["I SKYRIUS".to_string(), "BENDROSIOS NUOSTATOS".to_string()];
/// assert_eq!(
///     context_line(&crumbs, "1 straipsnis."),
///     "I SKYRIUS > BENDROSIOS NUOSTATOS > 1 straipsnis."
/// );
/// ```
#[must_use]
pub fn context_line(breadcrumb: &[String], title: &str) -> String {
    breadcrumb
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(title))
        .map(|part| part.replace(['\n', '\r'], " "))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(BREADCRUMB_SEPARATOR)
}

/// One addressable section of a statute edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDocument {
    /// Stable key: source URL plus `#` plus the section's element id.
    pub reference: String,

    /// Portal URL of the edition page.
    pub url: String,

    /// Section heading, empty when the section has none.
    pub title: String,

    /// Headings of the enclosing sections, outermost first.
    pub breadcrumb: Vec<String>,

    /// Canonical article number when the title is an article heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_no: Option<String>,

    /// Breadcrumb lines followed by the section content.
    pub text: String,

    pub window: EditionWindow,
}

impl SectionDocument {
    /// The `breadcrumb > title` line injected into continuation chunks.
    #[must_use]
    pub fn context_line(&self) -> String {
        context_line(&self.breadcrumb, &self.title)
    }

    /// Whether this section is the statute's list of amending acts.
    #[must_use]
    pub fn is_amendment_list(&self) -> bool {
        self.title == AMENDMENT_MARKER_TITLE
    }
}

/// Where a chunk's body sits, used to rebuild the section text exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBoundary {
    /// Byte length of the injected context line including its newline.
    pub prefix_len: usize,

    /// Byte offset of the chunk body inside the section text.
    pub offset: usize,
}

/// A bounded piece of a section document, the unit stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub reference: String,
    pub url: String,
    pub title: String,
    pub breadcrumb: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_no: Option<String>,
    pub window: EditionWindow,

    /// 1-based position within the section.
    pub chunk_number: u32,
    pub chunk_total: u32,
    pub is_last: bool,

    /// Chunk text; continuation chunks start with the context line.
    pub text: String,

    /// Body location; absent for chunks written without boundary markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<ChunkBoundary>,
}

impl Chunk {
    /// Index key of this chunk: `reference-chunk_number`.
    #[must_use]
    pub fn id(&self) -> String {
        chunk_id(&self.reference, self.chunk_number)
    }

    /// Chunk text without the injected context line.
    ///
    /// Without boundary markers the first line of a continuation chunk is
    /// taken to be the context line.
    #[must_use]
    pub fn body(&self) -> &str {
        match self.boundary {
            Some(boundary) => self.text.get(boundary.prefix_len..).unwrap_or(&self.text),
            None if self.chunk_number > 1 => self
                .text
                .split_once('\n')
                .map_or("", |(_, rest)| rest),
            None => &self.text,
        }
    }

    #[must_use]
    pub fn is_amendment_list(&self) -> bool {
        self.title == AMENDMENT_MARKER_TITLE
    }
}

/// Index key for a chunk of a reference.
#[must_use]
pub fn chunk_id(reference: &str, chunk_number: u32) -> String {
    format!("{reference}-{chunk_number}")
}
