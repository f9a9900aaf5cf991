//! Size-bounded, overlapping chunking of section documents.
//!
//! Chunk bodies are exact substrings of the section text. A break is made
//! after the coarsest separator found in the window (paragraph, line,
//! sentence, word), falling back to a hard cut on a character boundary.
//! Consecutive bodies overlap by at most `chunk_overlap` characters, and
//! the overlap always starts on a word boundary.

use std::ops::Range;

use crate::config::{CHUNK_OVERLAP, CHUNK_SIZE};
use crate::types::{Chunk, ChunkBoundary, SectionDocument};

/// Break candidates, coarsest first.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits section documents into chunks.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// Create a chunker; the overlap is clamped below the chunk size.
    #[must_use]
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Byte ranges of the chunk bodies of `text`, in order.
    ///
    /// # Examples
    /// ```
    /// use statute_harvester::chunker::Chunker;
    ///
    /// let chunker = Chunker::new(12, 4);
    /// let text = "alpha beta\ngamma delta";
    /// let bodies: Vec<_> = chunker.split_spans(text).into_iter().map(|r| &text[r]).collect();
    /// assert_eq!(bodies, vec!["alpha beta\n", "gamma delta"]);
    /// ```
    #[must_use]
    pub fn split_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        if text.is_empty() {
            return spans;
        }

        let mut start = 0;
        loop {
            let Some(limit) = nth_char_index(text, start, self.chunk_size) else {
                spans.push(start..text.len());
                break;
            };

            let end = self
                .find_break(&text[start..limit])
                .map_or(limit, |offset| start + offset);
            spans.push(start..end);

            let mut next = self.overlap_start(text, end);
            if next <= start {
                next = end;
            }
            start = next;
        }

        spans
    }

    /// Split a section document into numbered chunks.
    ///
    /// Every chunk after the first starts with the section's context line.
    #[must_use]
    pub fn chunk(&self, section: &SectionDocument) -> Vec<Chunk> {
        let spans = self.split_spans(&section.text);
        let total = u32::try_from(spans.len()).unwrap_or(u32::MAX);
        let prefix = format!("{}\n", section.context_line());

        spans
            .into_iter()
            .zip(1..)
            .map(|(span, chunk_number)| {
                let body = &section.text[span.clone()];
                let (text, prefix_len) = if chunk_number == 1 {
                    (body.to_string(), 0)
                } else {
                    (format!("{prefix}{body}"), prefix.len())
                };

                Chunk {
                    reference: section.reference.clone(),
                    url: section.url.clone(),
                    title: section.title.clone(),
                    breadcrumb: section.breadcrumb.clone(),
                    article_no: section.article_no.clone(),
                    window: section.window,
                    chunk_number,
                    chunk_total: total,
                    is_last: chunk_number == total,
                    text,
                    boundary: Some(ChunkBoundary {
                        prefix_len,
                        offset: span.start,
                    }),
                }
            })
            .collect()
    }

    /// Chunk every section of an edition, in order.
    #[must_use]
    pub fn chunk_all(&self, sections: &[SectionDocument]) -> Vec<Chunk> {
        sections.iter().flat_map(|s| self.chunk(s)).collect()
    }

    /// Byte offset just after the last occurrence of the coarsest separator.
    fn find_break(&self, window: &str) -> Option<usize> {
        SEPARATORS.iter().find_map(|separator| {
            window
                .rfind(separator)
                .map(|pos| pos + separator.len())
                .filter(|offset| *offset > 0)
        })
    }

    /// Start of the next body: `chunk_overlap` characters before `end`,
    /// moved forward past the next whitespace run.
    fn overlap_start(&self, text: &str, end: usize) -> usize {
        if self.chunk_overlap == 0 {
            return end;
        }

        let back = text[..end]
            .char_indices()
            .rev()
            .nth(self.chunk_overlap - 1)
            .map_or(0, |(i, _)| i);

        let region = &text[back..end];
        let Some(space) = region.find(char::is_whitespace) else {
            return end;
        };
        let after_space = region[space..]
            .find(|c: char| !c.is_whitespace())
            .map_or(region.len(), |i| space + i);
        back + after_space
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_OVERLAP)
    }
}

/// Byte index of the `n`-th character after `start`, if the text is longer.
fn nth_char_index(text: &str, start: usize, n: usize) -> Option<usize> {
    text[start..].char_indices().nth(n).map(|(i, _)| start + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::EditionWindow;
    use pretty_assertions::assert_eq;

    fn section(text: &str) -> SectionDocument {
        SectionDocument {
            reference: "https://e-seimas.lrs.lt/a#part_7".to_string(),
            url: "https://e-seimas.lrs.lt/a".to_string(),
            title: "7 straipsnis. Teisės".to_string(),
            breadcrumb: vec!["II SKYRIUS".to_string()],
            article_no: Some("7".to_string()),
            text: text.to_string(),
            window: EditionWindow::open_ended(20200701),
        }
    }

    fn long_text() -> String {
        (1..=60)
            .map(|i| format!("{i}. Asmuo turi teisę į informaciją apie save ir savo duomenis."))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = Chunker::default().chunk(&section("Trumpas tekstas."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Trumpas tekstas.");
        assert_eq!(chunks[0].chunk_number, 1);
        assert!(chunks[0].is_last);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(Chunker::default().chunk(&section("")).is_empty());
    }

    #[test]
    fn test_numbering_is_contiguous_and_last_flag_unique() {
        let chunks = Chunker::default().chunk(&section(&long_text()));
        assert!(chunks.len() > 2);

        let numbers: Vec<u32> = chunks.iter().map(|c| c.chunk_number).collect();
        let expected: Vec<u32> = (1..=u32::try_from(chunks.len()).unwrap()).collect();
        assert_eq!(numbers, expected);

        let last: Vec<bool> = chunks.iter().map(|c| c.is_last).collect();
        assert_eq!(last.iter().filter(|l| **l).count(), 1);
        assert!(*last.last().unwrap());
        assert!(chunks.iter().all(|c| c.chunk_total as usize == chunks.len()));
    }

    #[test]
    fn test_continuation_chunks_carry_context_line() {
        let chunks = Chunker::default().chunk(&section(&long_text()));
        assert!(!chunks[0].text.starts_with("II SKYRIUS"));
        for chunk in &chunks[1..] {
            assert!(chunk.text.starts_with("II SKYRIUS > 7 straipsnis. Teisės\n"));
        }
    }

    #[test]
    fn test_bodies_bounded_and_overlap_limited() {
        let text = long_text();
        let chunker = Chunker::default();
        let spans = chunker.split_spans(&text);

        for span in &spans {
            assert!(text[span.clone()].chars().count() <= CHUNK_SIZE);
        }
        for pair in spans.windows(2) {
            assert!(pair[1].start > pair[0].start);
            assert!(pair[1].start <= pair[0].end);
            assert!(text[pair[1].start..pair[0].end].chars().count() <= CHUNK_OVERLAP);
        }
        assert_eq!(spans.last().unwrap().end, text.len());
    }

    #[test]
    fn test_breaks_prefer_line_ends() {
        let spans = Chunker::default().split_spans(&long_text());
        let text = long_text();
        assert!(text[spans[0].clone()].ends_with('\n'));
    }

    #[test]
    fn test_overlap_starts_on_word_boundary() {
        let text = long_text();
        for span in Chunker::default().split_spans(&text).iter().skip(1) {
            let before = text[..span.start].chars().last().unwrap();
            assert!(before.is_whitespace());
        }
    }

    #[test]
    fn test_hard_cut_on_multibyte_text() {
        let text = "ąčęėįšųūž".repeat(300);
        let spans = Chunker::new(100, 20).split_spans(&text);
        assert!(spans.len() > 1);
        for span in &spans {
            assert!(text[span.clone()].chars().count() <= 100);
        }
        assert_eq!(spans.last().unwrap().end, text.len());
    }

    #[test]
    fn test_boundary_markers_locate_body() {
        let sec = section(&long_text());
        for chunk in Chunker::default().chunk(&sec) {
            let boundary = chunk.boundary.unwrap();
            let body = chunk.body();
            assert_eq!(&sec.text[boundary.offset..boundary.offset + body.len()], body);
        }
    }

    #[test]
    fn test_overlap_clamped_below_size() {
        let chunker = Chunker::new(10, 50);
        assert_eq!(chunker.chunk_overlap(), 9);
    }
}
