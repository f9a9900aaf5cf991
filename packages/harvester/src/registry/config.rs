//! Registry configuration for edition page paragraphs.

use super::core::ElementRegistry;
use super::handlers::{AnchorHandler, LineBreakHandler, SupHandler};

/// Create an inline registry configured for e-seimas edition pages.
///
/// Tags not listed here (`span`, `b`, `i`, `font`, Word's `o:p`) pass
/// their text through unchanged.
#[must_use]
pub fn create_inline_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    registry.register("sup", SupHandler);
    registry.register("a", AnchorHandler);
    registry.register("br", LineBreakHandler);

    registry.skip(["script", "style", "noscript"]);

    registry
}
