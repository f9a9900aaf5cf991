//! Rebuilding a section document from its stored chunks.

use serde::Serialize;
use statute_harvester::{Chunk, EditionWindow};

/// A section rebuilt from its chunks, with the descriptive fields agents need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassembledDocument {
    pub reference: String,
    pub url: String,
    pub breadcrumb: Vec<String>,
    pub title: String,
    pub window: EditionWindow,
    pub text: String,
}

/// Stitch the chunks of one reference back into its section text.
///
/// Chunks are ordered by `chunk_number`. When every chunk carries its
/// boundary markers the context lines are cut at `prefix_len` and the
/// overlap is removed using `offset`, which reproduces the section text
/// exactly. Otherwise the first line of every chunk after the first is
/// dropped and the remaining lines are joined with `\n`.
///
/// A trailing run of chunks (not starting at chunk 1) is stitched the same
/// way, starting at the first chunk's body.
///
/// Returns `None` for an empty input. Descriptive fields come from the
/// first chunk.
#[must_use]
pub fn reassemble(chunks: &[Chunk]) -> Option<ReassembledDocument> {
    let mut ordered: Vec<&Chunk> = chunks.iter().collect();
    ordered.sort_by_key(|c| c.chunk_number);
    let first = *ordered.first()?;

    let text = stitch_exact(&ordered).unwrap_or_else(|| stitch_lines(&ordered));

    Some(ReassembledDocument {
        reference: first.reference.clone(),
        url: first.url.clone(),
        breadcrumb: first.breadcrumb.clone(),
        title: first.title.clone(),
        window: first.window,
        text,
    })
}

/// Join the chunk bodies, skipping what overlaps the text already covered.
///
/// `None` when a chunk lacks markers or the markers do not line up.
fn stitch_exact(ordered: &[&Chunk]) -> Option<String> {
    let mut text = String::new();
    let mut covered_to = ordered.first()?.boundary?.offset;

    for chunk in ordered {
        let boundary = chunk.boundary?;
        let body = chunk.text.get(boundary.prefix_len..)?;
        if boundary.offset > covered_to {
            return None;
        }

        let skip = covered_to - boundary.offset;
        if skip < body.len() {
            text.push_str(body.get(skip..)?);
            covered_to = boundary.offset + body.len();
        }
    }

    Some(text)
}

fn stitch_lines(ordered: &[&Chunk]) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for (i, chunk) in ordered.iter().enumerate() {
        let skip = usize::from(i > 0);
        lines.extend(chunk.text.lines().skip(skip));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use statute_harvester::{ChunkBoundary, Chunker, SectionDocument};

    use super::*;

    fn section(text: &str) -> SectionDocument {
        SectionDocument {
            reference: "https://e-seimas.lrs.lt/a#part_a02".to_string(),
            url: "https://e-seimas.lrs.lt/a".to_string(),
            title: "2 straipsnis. Sąvokos".to_string(),
            breadcrumb: vec!["I SKYRIUS".to_string()],
            article_no: Some("2".to_string()),
            text: text.to_string(),
            window: EditionWindow::open_ended(20200701),
        }
    }

    fn long_text() -> String {
        (1..=12)
            .map(|i| format!("{i}. Sąvoka nr. {i} reiškia asmens duomenų tvarkymo veiksmą, atliekamą automatizuotomis priemonėmis."))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_exact_reassembly_with_markers() {
        let doc = section(&long_text());
        let chunks = Chunker::new(300, 80).chunk(&doc);
        assert!(chunks.len() > 2);

        let rebuilt = reassemble(&chunks).unwrap();
        assert_eq!(rebuilt.text, doc.text);
        assert_eq!(rebuilt.reference, doc.reference);
        assert_eq!(rebuilt.title, doc.title);
        assert_eq!(rebuilt.breadcrumb, doc.breadcrumb);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let doc = section(&long_text());
        let mut chunks = Chunker::new(250, 60).chunk(&doc);
        chunks.reverse();
        assert_eq!(reassemble(&chunks).unwrap().text, doc.text);
    }

    #[test]
    fn test_multibyte_overlap() {
        let text = "Įstatymas ąčęėįšųūž ".repeat(40);
        let doc = section(text.trim_end());
        let chunks = Chunker::new(97, 31).chunk(&doc);
        assert_eq!(reassemble(&chunks).unwrap().text, doc.text);
    }

    #[test]
    fn test_trailing_run_starts_at_its_first_body() {
        let doc = section(&long_text());
        let chunks = Chunker::new(300, 80).chunk(&doc);
        let tail = &chunks[chunks.len() - 2..];

        let rebuilt = reassemble(tail).unwrap();
        assert_eq!(rebuilt.text, &doc.text[tail[0].boundary.unwrap().offset..]);
    }

    #[test]
    fn test_legacy_rule_without_markers() {
        let mut chunks = Chunker::default().chunk(&section("first line\nsecond line"));
        chunks.push(Chunk {
            chunk_number: 2,
            text: "I SKYRIUS > 2 straipsnis. Sąvokos\nthird line\nfourth line".to_string(),
            ..chunks[0].clone()
        });
        chunks.iter_mut().for_each(|c| c.boundary = None);

        assert_eq!(
            reassemble(&chunks).unwrap().text,
            "first line\nsecond line\nthird line\nfourth line"
        );
    }

    #[test]
    fn test_inconsistent_markers_fall_back() {
        let base = Chunker::default().chunk(&section("alpha\nbeta")).remove(0);
        let second = Chunk {
            chunk_number: 2,
            text: "ctx\ngamma".to_string(),
            boundary: Some(ChunkBoundary {
                prefix_len: 4,
                offset: 500,
            }),
            ..base.clone()
        };
        assert_eq!(reassemble(&[second, base]).unwrap().text, "alpha\nbeta\ngamma");
    }

    #[test]
    fn test_empty_input() {
        assert!(reassemble(&[]).is_none());
    }
}
