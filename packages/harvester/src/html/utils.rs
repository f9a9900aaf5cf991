//! Helpers over `scraper` element references.

use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Get the lowercase local tag name of an element.
///
/// # Examples
/// ```
/// use scraper::{Html, Selector};
/// use statute_harvester::html::tag_name;
///
/// let html = Html::parse_fragment("<p>text</p>");
/// let selector = Selector::parse("p").unwrap();
/// let p = html.select(&selector).next().unwrap();
/// assert_eq!(tag_name(p), "p");
/// ```
pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Iterate over the direct child elements, skipping text and comments.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Check whether an element carries the given class.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Check whether any element below `element` has one of the given tag names.
pub fn has_descendant(element: ElementRef<'_>, tags: &[&str]) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|e| tags.contains(&tag_name(e)))
}

/// Text content of an element: trimmed text nodes joined by single spaces.
///
/// A superscript becomes a separate word, so `5<sup>1</sup>` reads `5 1`.
pub fn plain_text(element: ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_text(&joined)
}

/// NFC-normalize text and collapse every whitespace run to one space.
///
/// # Examples
/// ```
/// use statute_harvester::html::normalize_text;
///
/// assert_eq!(normalize_text("  a\n\t b\u{a0}c "), "a b c");
/// ```
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}
