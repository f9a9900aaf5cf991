//! Inline element handlers for text-level elements.
//!
//! These handlers process elements that appear inline within paragraphs,
//! such as superscripts, hyperlinks and line breaks.

use scraper::ElementRef;

use crate::registry::handler::{extract_inline_text, ElementHandler, RecurseFn};

/// Handler for `<sup>` elements: renders `^text`.
pub struct SupHandler;

impl ElementHandler for SupHandler {
    fn handle<'a>(&self, element: ElementRef<'a>, recurse: &RecurseFn<'a>) -> String {
        format!("^{}", extract_inline_text(element, recurse).trim())
    }
}

/// Handler for `<a>` elements: renders `text[href="url"]` with the link
/// text trimmed.
///
/// Anchors without an `href` (bookmarks) render as their plain text.
pub struct AnchorHandler;

impl ElementHandler for AnchorHandler {
    fn handle<'a>(&self, element: ElementRef<'a>, recurse: &RecurseFn<'a>) -> String {
        let text = extract_inline_text(element, recurse);
        match element.value().attr("href") {
            Some(href) => format!("{}[href=\"{href}\"]", text.trim()),
            None => text,
        }
    }
}

/// Handler for `<br>`: a line break inside a paragraph reads as a space.
pub struct LineBreakHandler;

impl ElementHandler for LineBreakHandler {
    fn handle<'a>(&self, _element: ElementRef<'a>, _recurse: &RecurseFn<'a>) -> String {
        " ".to_string()
    }
}
