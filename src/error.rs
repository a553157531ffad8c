//! Recoverable navigation errors.

use thiserror::Error;

use crate::tree::display_path;

/// Failures a user action can produce without leaving the viewer.
///
/// These are shown in the status bar; nothing is torn down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The path does not address any node.
    #[error("Path not found: {}", display_path(.0))]
    NotFound(String),
    /// The node exists but an ancestor is folded.
    #[error("Path not visible (may be collapsed): {}", display_path(.0))]
    NotVisible(String),
    /// The search term matched nothing.
    #[error("Pattern not found: {0}")]
    NoMatches(String),
}

pub type NavResult<T> = Result<T, NavError>;
