//! HTML utilities for navigating parsed edition pages.

mod utils;

pub use utils::{
    child_elements, has_class, has_descendant, normalize_text, plain_text, tag_name,
};
