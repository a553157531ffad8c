//! Addressable node graph built once from a decoded value.

use std::collections::HashMap;

use super::path::{Segment, child_path};
use super::value::{NodeType, Value};

/// Index of a node inside a [`ValueTree`].
pub type NodeId = usize;

/// A single JSON node with its permanent line coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique address (`""` for the root)
    pub path: String,
    pub node_type: NodeType,
    /// How this node hangs off its parent
    pub segment: Segment,
    pub parent: Option<NodeId>,
    /// Children in source order
    pub children: Vec<NodeId>,
    /// 0 for the root
    pub depth: usize,
    /// Real line of the opening token (or of the whole leaf)
    pub line: usize,
    /// Real line of the closing token, composites only
    pub closing_line: Option<usize>,
    /// Scalar value, primitives only
    pub scalar: Option<Value>,
    /// Rendered value text, empty for composites
    pub value_text: String,
}

impl Node {
    /// Object key of this node, if it is an object member.
    pub fn key(&self) -> Option<&str> {
        self.segment.key()
    }

    pub const fn is_array_element(&self) -> bool {
        matches!(self.segment, Segment::Index(_))
    }

    pub const fn is_composite(&self) -> bool {
        self.node_type.is_composite()
    }
}

/// Node graph with O(1) lookups by path, by real line and by parent.
///
/// Real lines are assigned in depth-first pre-order: a leaf takes one
/// line, a composite takes one for its opening token, then its children's
/// lines, then one for its closing token.
///
/// # Example
///
/// ```
/// use vj::tree::{Value, ValueTree};
///
/// let value: Value = serde_json::from_str(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
/// let tree = ValueTree::build(&value);
/// assert_eq!(tree.line_count(), 7);
/// assert_eq!(tree.node("b[1]").map(|n| n.line), Some(4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueTree {
    nodes: Vec<Node>,
    by_path: HashMap<String, NodeId>,
    /// Indexed by real line; closing lines map to their composite
    by_line: Vec<NodeId>,
}

impl ValueTree {
    /// Build the tree for `root`.
    pub fn build(root: &Value) -> Self {
        let mut tree = Self::default();
        tree.insert(root, Segment::Root, None, String::new(), 0);
        tracing::debug!(
            nodes = tree.nodes.len(),
            lines = tree.by_line.len(),
            "value tree built"
        );
        tree
    }

    fn insert(
        &mut self,
        value: &Value,
        segment: Segment,
        parent: Option<NodeId>,
        path: String,
        depth: usize,
    ) -> NodeId {
        let id = self.nodes.len();
        let line = self.by_line.len();
        self.by_line.push(id);

        let node_type = value.node_type();
        let scalar = (!node_type.is_composite()).then(|| value.clone());
        self.nodes.push(Node {
            path: path.clone(),
            node_type,
            segment,
            parent,
            children: Vec::new(),
            depth,
            line,
            closing_line: None,
            scalar,
            value_text: value.value_text(),
        });
        self.by_path.insert(path.clone(), id);

        let children: Vec<NodeId> = match value {
            Value::Object(members) => members
                .iter()
                .map(|(key, child)| {
                    let segment = Segment::Key(key.clone());
                    let child_path = child_path(&path, &segment);
                    self.insert(child, segment, Some(id), child_path, depth + 1)
                })
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(idx, child)| {
                    let segment = Segment::Index(idx);
                    let child_path = child_path(&path, &segment);
                    self.insert(child, segment, Some(id), child_path, depth + 1)
                })
                .collect(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
        };

        if node_type.is_composite() {
            let closing = self.by_line.len();
            self.by_line.push(id);
            self.nodes[id].closing_line = Some(closing);
        }
        self.nodes[id].children = children;
        id
    }

    /// The root node.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Node addressed by `path`.
    pub fn node(&self, path: &str) -> Option<&Node> {
        self.by_path.get(path).map(|&id| &self.nodes[id])
    }

    /// Node whose opening or closing token sits on real line `line`.
    pub fn node_at_line(&self, line: usize) -> Option<&Node> {
        self.by_line.get(line).map(|&id| &self.nodes[id])
    }

    /// Node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Children of `path` in source order (empty when unknown or a leaf).
    pub fn children(&self, path: &str) -> impl Iterator<Item = &Node> + '_ {
        self.node(path)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&id| &self.nodes[id])
    }

    pub fn has_children(&self, path: &str) -> bool {
        self.node(path).is_some_and(|node| !node.children.is_empty())
    }

    /// Parent of `path`, `None` for the root or an unknown path.
    pub fn parent(&self, path: &str) -> Option<&Node> {
        self.node(path)
            .and_then(|node| node.parent)
            .map(|id| &self.nodes[id])
    }

    /// Total number of real lines with everything expanded.
    pub fn line_count(&self) -> usize {
        self.by_line.len()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether every ancestor of `path` is expanded under `is_collapsed`.
    pub fn ancestors_expanded(&self, path: &str, is_collapsed: impl Fn(&str) -> bool) -> bool {
        let mut current = self.node(path).and_then(|node| node.parent);
        while let Some(id) = current {
            let node = &self.nodes[id];
            if is_collapsed(&node.path) {
                return false;
            }
            current = node.parent;
        }
        true
    }
}
