//! Extraction of amending acts from an edition's amendment list.
//!
//! The list is a run of entries shaped like:
//!
//! ```text
//! 6.
//! Lietuvos Respublikos Seimas, Įstatymas
//! Nr. XIII-1426[href="https://www.e-tar.lt/..."], 2018-06-30, paskelbta TAR 2018-07-13
//! Asmens duomenų teisinės apsaugos įstatymo pakeitimo įstatymas
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use statute_harvester::Chunk;

use crate::reassemble::reassemble;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENTRY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REGISTRATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^Nr\. [^\[]+\[href="([^"]+)"\], .+"#).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HREF_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[href="[^"]*"\]"#).expect("valid regex"));

/// One amending act listed in an edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendmentEntry {
    /// Position in the statute's amendment history.
    pub number: u32,

    /// Link to the amending act.
    pub url: String,

    /// Description, registration line and title, without link tokens.
    pub text: String,
}

/// Parse the entries of an amendment list.
///
/// An entry is a line holding only `N.`, one or more description lines, a
/// registration line `Nr. <label>[href="<url>"], <details>`, and at least
/// one more line before the next entry. Spans that do not fit this shape
/// are skipped. Duplicate numbers keep their first occurrence; the result
/// is sorted by number.
///
/// # Examples
/// ```
/// use statute_index::changes::parse_amendments;
///
/// let text = "Pakeitimai:\n1.\nSeimas, Įstatymas\nNr. I-1[href=\"https://e-tar.lt/1\"], 2000-01-01\nPakeitimo įstatymas";
/// let entries = parse_amendments(text);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].url, "https://e-tar.lt/1");
/// assert_eq!(entries[0].text, "Seimas, Įstatymas\nNr. I-1, 2000-01-01\nPakeitimo įstatymas");
/// ```
#[must_use]
pub fn parse_amendments(text: &str) -> Vec<AmendmentEntry> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| ENTRY_NUMBER.is_match(line))
        .map(|(i, _)| i)
        .collect();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(lines.len());
        match parse_entry(&lines[start..end]) {
            Some(entry) if seen.insert(entry.number) => entries.push(entry),
            Some(entry) => {
                tracing::debug!(number = entry.number, "Skipping duplicate amendment entry");
            }
            None => {
                tracing::debug!(line = lines[start], "Skipping malformed amendment entry");
            }
        }
    }

    entries.sort_by_key(|e| e.number);
    entries
}

fn parse_entry(group: &[&str]) -> Option<AmendmentEntry> {
    let (head, body) = group.split_first()?;
    let number = ENTRY_NUMBER.captures(head)?.get(1)?.as_str().parse().ok()?;

    // At least one description line precedes the registration line.
    let (position, url) = body.iter().enumerate().skip(1).find_map(|(i, line)| {
        REGISTRATION_LINE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| (i, m.as_str().to_string()))
    })?;
    if position + 1 >= body.len() {
        return None;
    }

    let text = HREF_TOKEN.replace_all(&body.join("\n"), "").trim().to_string();
    Some(AmendmentEntry { number, url, text })
}

/// Parse the tail of an edition's amendment list.
///
/// Only the two highest-numbered chunks are read, since new amendments are
/// appended at the end of the list. They are stitched in reading order
/// before parsing.
#[must_use]
pub fn tail_amendments(chunks: &[Chunk]) -> Vec<AmendmentEntry> {
    let mut ordered: Vec<&Chunk> = chunks.iter().collect();
    ordered.sort_by(|a, b| b.chunk_number.cmp(&a.chunk_number));
    let tail: Vec<Chunk> = ordered.into_iter().take(2).cloned().collect();

    reassemble(&tail)
        .map(|doc| parse_amendments(&doc.text))
        .unwrap_or_default()
}

/// Entries of `current` newer than everything listed in `previous`.
///
/// An empty `previous` yields an empty result: without a baseline nothing
/// can be called new.
#[must_use]
pub fn incremental_changes(
    current: &[AmendmentEntry],
    previous: &[AmendmentEntry],
) -> Vec<AmendmentEntry> {
    let Some(baseline) = previous.iter().map(|e| e.number).max() else {
        return Vec::new();
    };
    current
        .iter()
        .filter(|e| e.number > baseline)
        .cloned()
        .collect()
}
