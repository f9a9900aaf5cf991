//! Conversion of edition page markup into a structural node tree.

use scraper::{ElementRef, Html};

use super::types::StructuralNode;
use crate::error::{HarvesterError, Result};
use crate::html::{child_elements, has_class, has_descendant, plain_text, tag_name};
use crate::layout::SourceLayout;
use crate::registry::{create_inline_registry, RenderEngine};
use crate::window::EditionWindow;

/// Top-level structure and validity window of one edition page.
#[derive(Debug, Clone)]
pub struct ParsedEdition {
    pub window: EditionWindow,
    pub parts: Vec<StructuralNode>,
}

/// Parser turning page markup into [`StructuralNode`] trees.
pub struct StructureParser<'l> {
    layout: &'l SourceLayout,
    engine: RenderEngine,
}

impl<'l> StructureParser<'l> {
    /// Create a parser for the given layout.
    #[must_use]
    pub fn new(layout: &'l SourceLayout) -> Self {
        Self {
            layout,
            engine: RenderEngine::new(create_inline_registry()),
        }
    }

    /// Parse one edition page.
    ///
    /// # Arguments
    /// * `html` - Page markup
    /// * `url` - Portal URL, used in error messages
    ///
    /// # Errors
    /// * `StructureNotFound` when the root container is absent
    /// * `EditionWindowNotFound` when no preamble states the validity window
    pub fn parse(&self, html: &str, url: &str) -> Result<ParsedEdition> {
        let document = Html::parse_document(html);
        let selector = self.layout.root()?;

        let root = document
            .select(&selector)
            .next()
            .ok_or_else(|| HarvesterError::StructureNotFound {
                selector: self.layout.root_selector.clone(),
                url: url.to_string(),
            })?;

        let top_parts: Vec<ElementRef<'_>> =
            child_elements(root).filter(|e| self.is_part(*e)).collect();

        let window = top_parts
            .first()
            .and_then(|first| self.find_window(*first))
            .ok_or_else(|| HarvesterError::EditionWindowNotFound {
                url: url.to_string(),
            })??;

        let parts = top_parts.into_iter().map(|e| self.build_node(e)).collect();

        Ok(ParsedEdition { window, parts })
    }

    fn is_part(&self, element: ElementRef<'_>) -> bool {
        self.layout
            .is_part(tag_name(element), element.value().attr("id"))
    }

    /// The window stated by the first preamble paragraph of the first part.
    fn find_window(&self, first_part: ElementRef<'_>) -> Option<Result<EditionWindow>> {
        child_elements(first_part)
            .filter(|e| tag_name(*e) == "p")
            .find_map(|p| self.layout.parse_window(&plain_text(p)))
    }

    fn build_node(&self, element: ElementRef<'_>) -> StructuralNode {
        let id = element.value().attr("id").unwrap_or_default();
        let mut node = StructuralNode::new(id, self.extract_title(element));

        for child in child_elements(element) {
            let tag = tag_name(child);

            if self.is_part(child) {
                node = node.with_child(self.build_node(child));
            } else if tag == "p" {
                let line = self.engine.render_line(child);
                if !line.is_empty() {
                    node = node.with_line(line);
                }
            } else if tag == "table" && has_class(child, &self.layout.table_class) {
                node = node.with_table(child.html());
            } else {
                let text = plain_text(child);
                if !text.is_empty() {
                    node = node.with_line(text);
                }
            }
        }

        node
    }

    /// Heading of a container.
    ///
    /// Only the leading run of heading-class paragraphs is considered; of
    /// those, paragraphs with bold and without italic text form the title.
    fn extract_title(&self, element: ElementRef<'_>) -> String {
        child_elements(element)
            .take_while(|e| tag_name(*e) == "p" && has_class(*e, &self.layout.heading_class))
            .filter(|p| has_descendant(*p, &["b", "strong"]) && !has_descendant(*p, &["i", "em"]))
            .map(plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
