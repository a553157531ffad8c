//! JSON value tree.
//!
//! This module handles:
//! - The decoded [`Value`] model
//! - Building the addressable [`ValueTree`] with permanent line numbers
//! - The fold state ([`CollapseState`])

mod collapse;
mod path;
mod value;
mod value_tree;

pub use collapse::CollapseState;
pub use path::{Segment, child_path, display_path, normalize_user_path};
pub use value::{NodeType, Value, escape_json_string};
pub use value_tree::{Node, NodeId, ValueTree};
