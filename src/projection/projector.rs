//! Depth-first projection of a tree under a fold state.

use crate::tree::{CollapseState, Node, ValueTree};

use super::types::{LineKind, LineRecord, Projection};

/// Walk `tree` from the root honoring `collapsed`.
///
/// Folded composites produce one summary record and are not descended
/// into. Expanded composites produce an opening record, their children,
/// then a closing record. Leaves produce one record. The result depends
/// only on the two inputs.
pub fn project(tree: &ValueTree, collapsed: &CollapseState) -> Projection {
    let mut lines = Vec::with_capacity(tree.line_count());
    if let Some(root) = tree.root() {
        collect(tree, collapsed, root, 0, true, &mut lines);
    }
    Projection::from_lines(lines)
}

fn collect(
    tree: &ValueTree,
    collapsed: &CollapseState,
    node: &Node,
    indent: usize,
    is_last: bool,
    out: &mut Vec<LineRecord>,
) {
    let key = node.key().map(ToOwned::to_owned);
    if !node.is_composite() {
        out.push(LineRecord {
            kind: LineKind::Leaf,
            path: node.path.clone(),
            node_type: node.node_type,
            key,
            value_text: node.value_text.clone(),
            indent,
            is_collapsed: false,
            has_children: false,
            is_array_element: node.is_array_element(),
            is_last_child: is_last,
            bracket: None,
            child_count: 0,
            real_line: node.line,
        });
        return;
    }

    let is_collapsed = collapsed.is_collapsed(&node.path);
    let kind = if key.is_some() {
        LineKind::OpenBracketWithKey
    } else {
        LineKind::OpenBracket
    };
    out.push(LineRecord {
        kind,
        path: node.path.clone(),
        node_type: node.node_type,
        key,
        value_text: String::new(),
        indent,
        is_collapsed,
        has_children: !node.children.is_empty(),
        is_array_element: node.is_array_element(),
        is_last_child: is_last,
        bracket: node.node_type.open_bracket(),
        child_count: node.children.len(),
        real_line: node.line,
    });
    if is_collapsed {
        return;
    }

    let last_idx = node.children.len().saturating_sub(1);
    for (idx, child) in node
        .children
        .iter()
        .filter_map(|&id| tree.get(id))
        .enumerate()
    {
        collect(tree, collapsed, child, indent + 1, idx == last_idx, out);
    }

    out.push(LineRecord {
        kind: LineKind::CloseBracket,
        path: node.path.clone(),
        node_type: node.node_type,
        key: None,
        value_text: String::new(),
        indent,
        is_collapsed: false,
        has_children: !node.children.is_empty(),
        is_array_element: node.is_array_element(),
        is_last_child: is_last,
        bracket: node.node_type.close_bracket(),
        child_count: node.children.len(),
        real_line: node.closing_line.unwrap_or(node.line),
    });
}
