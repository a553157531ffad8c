//! Projection of the value tree into displayable lines.
//!
//! This module handles:
//! - Walking a [`ValueTree`](crate::tree::ValueTree) under a
//!   [`CollapseState`](crate::tree::CollapseState)
//! - The [`LineRecord`] sequence a renderer consumes
//! - The virtual → real line map used to resolve rows back to nodes

mod projector;
mod types;

pub use projector::project;
pub use types::{LineKind, LineRecord, Projection};
