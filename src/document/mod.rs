//! Loaded JSON document.
//!
//! This module handles:
//! - Decoding input bytes into a [`Value`]
//! - Owning the tree, the fold state and the current projection together
//! - Re-projecting after every fold edit and on reload

use anyhow::{Context, Result, bail};

use crate::error::{NavError, NavResult};
use crate::projection::{LineRecord, Projection, project};
use crate::tree::{CollapseState, Node, Value, ValueTree};

/// Decode a single JSON value from raw bytes.
///
/// A leading UTF-8 byte order mark is ignored. Trailing data after the
/// first value is an error, so concatenated documents are rejected.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        bail!("input is empty");
    }
    serde_json::from_slice(bytes).context("invalid JSON")
}

/// A value tree together with its fold state and current projection.
///
/// The tree never changes after construction. Every fold edit goes through
/// [`Document::collapse`] or [`Document::expand`], which re-project and
/// bump [`Document::revision`] so dependents can tell their view is stale.
#[derive(Debug, Clone, Default)]
pub struct Document {
    tree: ValueTree,
    collapsed: CollapseState,
    projection: Projection,
    revision: u64,
}

impl Document {
    /// Document for an already decoded value, fully expanded.
    pub fn new(value: &Value) -> Self {
        let tree = ValueTree::build(value);
        let collapsed = CollapseState::new();
        let projection = project(&tree, &collapsed);
        Self {
            tree,
            collapsed,
            projection,
            revision: 0,
        }
    }

    /// Decode `bytes` and build a document.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes).map(|value| Self::new(&value))
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Self::from_json_bytes(source.as_bytes())
    }

    pub const fn tree(&self) -> &ValueTree {
        &self.tree
    }

    pub const fn collapsed(&self) -> &CollapseState {
        &self.collapsed
    }

    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn lines(&self) -> &[LineRecord] {
        self.projection.lines()
    }

    /// Number of virtual lines in the current projection.
    pub fn line_count(&self) -> usize {
        self.projection.len()
    }

    pub fn line_at(&self, virtual_line: usize) -> Option<&LineRecord> {
        self.projection.line_at(virtual_line)
    }

    /// Up to `count` records starting at virtual line `offset`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[LineRecord] {
        self.projection.slice(offset, count)
    }

    /// Node shown on virtual line `virtual_line`.
    pub fn node_at_virtual(&self, virtual_line: usize) -> Option<&Node> {
        self.projection
            .real_line(virtual_line)
            .and_then(|real| self.tree.node_at_line(real))
    }

    /// Virtual line of the opening row of `path`.
    pub fn virtual_line_of(&self, path: &str) -> NavResult<usize> {
        let node = self
            .tree
            .node(path)
            .ok_or_else(|| NavError::NotFound(path.to_string()))?;
        self.projection
            .virtual_line(node.line)
            .ok_or_else(|| NavError::NotVisible(path.to_string()))
    }

    /// Increments on every change to the projection.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Fold the composite at `path`. Returns true if the projection changed.
    ///
    /// Leaves and unknown paths are left alone.
    pub fn collapse(&mut self, path: &str) -> bool {
        if !self.is_composite(path) || !self.collapsed.collapse(path) {
            return false;
        }
        tracing::debug!(path, "collapse");
        self.reproject();
        true
    }

    /// Unfold `path`. Returns true if the projection changed.
    pub fn expand(&mut self, path: &str) -> bool {
        if !self.collapsed.expand(path) {
            return false;
        }
        tracing::debug!(path, "expand");
        self.reproject();
        true
    }

    /// Replace the tree with a freshly decoded value.
    ///
    /// Fold flags are kept for paths that are still composites in the new
    /// tree.
    pub fn reload(&mut self, value: &Value) {
        self.tree = ValueTree::build(value);
        let tree = &self.tree;
        self.collapsed
            .retain(|path| tree.node(path).is_some_and(Node::is_composite));
        tracing::debug!(folds = self.collapsed.len(), "document reloaded");
        self.reproject();
    }

    fn is_composite(&self, path: &str) -> bool {
        self.tree.node(path).is_some_and(Node::is_composite)
    }

    fn reproject(&mut self) {
        self.projection = project(&self.tree, &self.collapsed);
        self.revision = self.revision.wrapping_add(1);
        tracing::debug!(
            lines = self.projection.len(),
            revision = self.revision,
            "re-projected"
        );
    }
}
