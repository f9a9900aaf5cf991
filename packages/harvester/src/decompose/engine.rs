//! Decomposer that walks structural trees and emits section documents.

use super::parse::ParsedEdition;
use super::strategy::SplitStrategy;
use super::types::{DecomposeContext, Segment, StructuralNode};
use crate::types::SectionDocument;

/// Engine for decomposing an edition into section documents.
///
/// Every top-level part is visited. A node with non-empty own content
/// becomes a section; children chosen by the strategy are walked as
/// sections of their own, all other children are inlined into their parent.
pub struct Decomposer<S: SplitStrategy> {
    strategy: S,
}

impl<S: SplitStrategy> Decomposer<S> {
    /// Create a new decomposer.
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Decompose a parsed edition.
    ///
    /// # Arguments
    /// * `edition` - Parsed page structure and validity window
    /// * `url` - Portal URL, the prefix of every reference
    ///
    /// # Returns
    /// Section documents in reading order, all sharing the edition window
    pub fn decompose(&self, edition: &ParsedEdition, url: &str) -> Vec<SectionDocument> {
        let context = DecomposeContext::new(url, edition.window);
        let mut sections = Vec::new();

        for part in &edition.parts {
            self.walk(part, &context, &mut sections);
        }

        tracing::debug!(
            url = %url,
            sections = sections.len(),
            window = %edition.window,
            "Decomposed edition"
        );

        sections
    }

    fn walk(
        &self,
        node: &StructuralNode,
        context: &DecomposeContext,
        sections: &mut Vec<SectionDocument>,
    ) {
        let content = self.own_lines(node);
        if content.iter().any(|line| !line.trim().is_empty()) {
            sections.push(self.section(node, context, &content));
        }

        let child_context = context.with_heading(&node.title);
        for child in &node.children {
            if self.strategy.is_split_point(child) {
                self.walk(child, &child_context, sections);
            }
        }
    }

    /// Own content of a node: its lines and tables, the titles of split
    /// children, and the full content of every other child.
    fn own_lines<'n>(&self, node: &'n StructuralNode) -> Vec<&'n str> {
        let mut lines = Vec::new();

        for segment in &node.segments {
            match segment {
                Segment::Line(text) | Segment::Table(text) => lines.push(text.as_str()),
                Segment::Child(index) => {
                    let Some(child) = node.children.get(*index) else {
                        continue;
                    };
                    if self.strategy.is_split_point(child) {
                        if !child.title.is_empty() {
                            lines.push(child.title.as_str());
                        }
                    } else {
                        lines.extend(self.own_lines(child));
                    }
                }
            }
        }

        lines
    }

    fn section(
        &self,
        node: &StructuralNode,
        context: &DecomposeContext,
        content: &[&str],
    ) -> SectionDocument {
        let text = context
            .breadcrumb
            .iter()
            .map(String::as_str)
            .chain(content.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        SectionDocument {
            reference: context.reference(&node.id),
            url: context.url.clone(),
            title: node.title.clone(),
            breadcrumb: context.breadcrumb.clone(),
            article_no: self.strategy.article_no(node),
            text,
            window: context.window,
        }
    }
}
