//! Element handler trait definition.

use scraper::ElementRef;

/// Function type for recursive processing of child elements.
pub type RecurseFn<'a> = dyn Fn(ElementRef<'a>) -> String + 'a;

/// Trait for inline element handlers.
///
/// Handlers are responsible for rendering a specific kind of HTML element
/// inside a paragraph and returning its text. They receive a `recurse`
/// function to render child elements.
pub trait ElementHandler: Send + Sync {
    /// Render the element.
    ///
    /// # Arguments
    /// * `element` - The HTML element to render
    /// * `recurse` - Function to call for recursive child rendering
    fn handle<'a>(&self, element: ElementRef<'a>, recurse: &RecurseFn<'a>) -> String;
}

/// Concatenate an element's text nodes and rendered child elements in
/// document order.
///
/// Whitespace is kept as-is; the caller normalizes the finished line.
pub fn extract_inline_text<'a>(element: ElementRef<'a>, recurse: &RecurseFn<'a>) -> String {
    let mut out = String::new();

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            out.push_str(&recurse(child_element));
        }
    }

    out
}
