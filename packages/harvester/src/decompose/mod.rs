//! Structural decomposition of edition pages into section documents.
//!
//! Decomposition runs in two passes: [`StructureParser`] turns the page
//! markup into an owned [`StructuralNode`] tree, then [`Decomposer`] walks
//! that tree and emits one [`SectionDocument`](crate::types::SectionDocument)
//! per addressable section.

mod engine;
mod parse;
mod strategy;
mod types;

pub use engine::Decomposer;
pub use parse::{ParsedEdition, StructureParser};
pub use strategy::{ArticleSplitStrategy, SplitStrategy};
pub use types::{DecomposeContext, Segment, StructuralNode};
