//! Strategies deciding which containers become standalone sections.

use super::types::StructuralNode;
use crate::layout::SourceLayout;

/// Trait for configurable splitting strategies.
///
/// Implementations determine which structural children are emitted as
/// their own sections and how they are numbered.
pub trait SplitStrategy {
    /// Whether this child becomes a standalone section instead of being
    /// inlined into its parent.
    fn is_split_point(&self, node: &StructuralNode) -> bool;

    /// Extract the article number for this node, if it has one.
    fn article_no(&self, node: &StructuralNode) -> Option<String>;
}

/// Strategy that splits at articles and at every container holding one.
pub struct ArticleSplitStrategy<'l> {
    layout: &'l SourceLayout,
}

impl<'l> ArticleSplitStrategy<'l> {
    #[must_use]
    pub fn new(layout: &'l SourceLayout) -> Self {
        Self { layout }
    }
}

impl SplitStrategy for ArticleSplitStrategy<'_> {
    fn is_split_point(&self, node: &StructuralNode) -> bool {
        self.layout.is_article_title(&node.title)
            || node.children.iter().any(|child| self.is_split_point(child))
    }

    fn article_no(&self, node: &StructuralNode) -> Option<String> {
        self.layout.article_no(&node.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_is_split_point() {
        let layout = SourceLayout::eseimas();
        let strategy = ArticleSplitStrategy::new(&layout);
        assert!(strategy.is_split_point(&StructuralNode::new("p", "3 straipsnis. Sąvokos")));
        assert!(!strategy.is_split_point(&StructuralNode::new("p", "1. Punktas")));
    }

    #[test]
    fn test_container_of_article_is_split_point() {
        let layout = SourceLayout::eseimas();
        let strategy = ArticleSplitStrategy::new(&layout);
        let chapter = StructuralNode::new("c", "II SKYRIUS").with_child(
            StructuralNode::new("s", "PIRMASIS SKIRSNIS")
                .with_child(StructuralNode::new("a", "4 straipsnis.")),
        );
        assert!(strategy.is_split_point(&chapter));
    }

    #[test]
    fn test_article_no_from_title() {
        let layout = SourceLayout::eseimas();
        let strategy = ArticleSplitStrategy::new(&layout);
        let node = StructuralNode::new("a", "5 1 straipsnis. Papildymas");
        assert_eq!(strategy.article_no(&node), Some("5-1".to_string()));
    }
}
