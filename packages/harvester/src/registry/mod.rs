//! Element registry system for rendering paragraph text.
//!
//! This module provides a registry-based approach to turning the inline
//! markup of an edition page into plain text lines. Element handlers can be
//! registered for specific tag names, allowing for extensible and testable
//! rendering.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;

pub use config::create_inline_registry;
pub use core::ElementRegistry;
pub use engine::RenderEngine;
pub use handler::{extract_inline_text, ElementHandler, RecurseFn};
