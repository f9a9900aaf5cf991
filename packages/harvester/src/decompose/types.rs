//! Types for the decomposition system.

use crate::window::EditionWindow;

/// One piece of a structural node's own content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A rendered paragraph or other text-bearing element, one line.
    Line(String),

    /// A native table kept as serialized HTML.
    Table(String),

    /// Position of the structural child with this index in `children`.
    Child(usize),
}

/// A structural container of an edition page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuralNode {
    /// Element id, unique within the page.
    pub id: String,

    /// Detected heading, empty when the node has none.
    pub title: String,

    pub segments: Vec<Segment>,

    pub children: Vec<StructuralNode>,
}

impl StructuralNode {
    /// Create a node without content.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            segments: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a text line.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.segments.push(Segment::Line(line.into()));
        self
    }

    /// Append a table block.
    #[must_use]
    pub fn with_table(mut self, html: impl Into<String>) -> Self {
        self.segments.push(Segment::Table(html.into()));
        self
    }

    /// Append a structural child at the current position.
    #[must_use]
    pub fn with_child(mut self, child: StructuralNode) -> Self {
        self.segments.push(Segment::Child(self.children.len()));
        self.children.push(child);
        self
    }
}

/// Context for decomposition.
///
/// Carries the edition-wide values and the breadcrumb through the
/// recursive tree walk. Each level gets its own copy.
#[derive(Debug, Clone)]
pub struct DecomposeContext {
    /// Portal URL of the edition page.
    pub url: String,

    /// Validity window shared by every section of the edition.
    pub window: EditionWindow,

    /// Non-empty headings of the enclosing sections, outermost first.
    pub breadcrumb: Vec<String>,
}

impl DecomposeContext {
    /// Create a context for the top level of an edition.
    #[must_use]
    pub fn new(url: impl Into<String>, window: EditionWindow) -> Self {
        Self {
            url: url.into(),
            window,
            breadcrumb: Vec::new(),
        }
    }

    /// Create a new context one level deeper, under `heading`.
    #[must_use]
    pub fn with_heading(&self, heading: &str) -> Self {
        let mut new = self.clone();
        if !heading.trim().is_empty() {
            new.breadcrumb.push(heading.to_string());
        }
        new
    }

    /// Reference key of a node in this edition.
    #[must_use]
    pub fn reference(&self, node_id: &str) -> String {
        format!("{}#{}", self.url, node_id)
    }
}
