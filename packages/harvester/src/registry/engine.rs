//! Render engine that orchestrates inline rendering using the registry.

use scraper::ElementRef;

use super::core::ElementRegistry;
use super::handler::extract_inline_text;
use crate::html::{normalize_text, tag_name};

/// Engine that renders paragraph content using the registry.
///
/// The engine walks the element tree and dispatches elements to their
/// registered handlers. Elements without a handler pass their content
/// through unchanged, since edition pages carry many presentational tags.
pub struct RenderEngine {
    registry: ElementRegistry,
}

impl RenderEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Render an element recursively, without normalizing whitespace.
    pub fn render(&self, element: ElementRef<'_>) -> String {
        let tag = tag_name(element);

        if self.registry.should_skip(tag) {
            return String::new();
        }

        let recurse = |child: ElementRef<'_>| self.render(child);

        match self.registry.get_handler(tag) {
            Some(handler) => handler.handle(element, &recurse),
            None => extract_inline_text(element, &recurse),
        }
    }

    /// Render the content of a paragraph as a single normalized line.
    ///
    /// # Examples
    /// ```
    /// use scraper::{Html, Selector};
    /// use statute_harvester::registry::{create_inline_registry, RenderEngine};
    ///
    /// let html = Html::parse_fragment(r#"<p>Žr. <a href="https://x/1">aktą</a>, 5<sup>1</sup></p>"#);
    /// let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
    /// let engine = RenderEngine::new(create_inline_registry());
    /// assert_eq!(engine.render_line(p), r#"Žr. aktą[href="https://x/1"], 5^1"#);
    /// ```
    pub fn render_line(&self, element: ElementRef<'_>) -> String {
        normalize_text(&self.render(element))
    }
}
