//! Tag rules for inline rendering.

use std::collections::HashMap;

use super::handler::ElementHandler;

/// What to do with an inline tag.
enum TagRule {
    Render(Box<dyn ElementHandler>),
    /// Drop the element and its content.
    Skip,
}

/// Inline tag rules of an edition page.
///
/// Tags without a rule pass their content through. A tag marked as
/// skipped stays skipped even if a handler is registered for it later.
#[derive(Default)]
pub struct ElementRegistry {
    rules: HashMap<String, TagRule>,
}

impl ElementRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `tag_name` elements with `handler`.
    pub fn register(&mut self, tag_name: impl Into<String>, handler: impl ElementHandler + 'static) {
        let tag_name = tag_name.into();
        if !self.should_skip(&tag_name) {
            self.rules.insert(tag_name, TagRule::Render(Box::new(handler)));
        }
    }

    /// Drop elements with these tags, content included.
    pub fn skip(&mut self, tag_names: impl IntoIterator<Item = impl Into<String>>) {
        self.rules
            .extend(tag_names.into_iter().map(|tag| (tag.into(), TagRule::Skip)));
    }

    pub fn get_handler(&self, tag_name: &str) -> Option<&dyn ElementHandler> {
        match self.rules.get(tag_name)? {
            TagRule::Render(handler) => Some(handler.as_ref()),
            TagRule::Skip => None,
        }
    }

    #[must_use]
    pub fn should_skip(&self, tag_name: &str) -> bool {
        matches!(self.rules.get(tag_name), Some(TagRule::Skip))
    }

    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        matches!(self.rules.get(tag_name), Some(TagRule::Render(_)))
    }
}
