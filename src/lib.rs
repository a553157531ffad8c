// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. search::SearchIndex)
    clippy::module_name_repetitions
)]

//! # vj
//!
//! A terminal JSON viewer.
//!
//! vj shows a JSON document as an indented tree with:
//! - Folding of objects and arrays
//! - Case-insensitive search over keys and values
//! - Jumps to jq-style paths such as `.users[0].name`
//! - File watching for live reload
//!
//! ## Architecture
//!
//! The engine works in four coordinate spaces. The [`tree`] assigns each
//! node a path and stable real line numbers; [`projection`] walks the tree
//! under a fold state into virtual lines; the [`ui::viewport`] maps virtual
//! lines to screen rows; [`navigation`] moves a cursor across all three.
//!
//! The terminal front end uses The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`tree`]: Value tree, paths and fold state
//! - [`projection`]: Fold-aware line projection
//! - [`document`]: Decoding plus tree, folds and projection kept in sync
//! - [`navigation`]: Cursor movement, counts and path jumps
//! - [`search`]: Search functionality
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod projection;
pub mod search;
pub mod tree;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::error::{NavError, NavResult};
    pub use crate::navigation::Navigator;
    pub use crate::search::SearchIndex;
    pub use crate::ui::viewport::Viewport;
}
