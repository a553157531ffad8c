//! Projected line records.

use std::collections::HashMap;

use crate::tree::{NodeType, escape_json_string};

/// What a projected row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Bare opening bracket (root or array element), or its folded summary
    OpenBracket,
    /// `"key": {` for an object member, or its folded summary
    OpenBracketWithKey,
    /// `}` or `]`
    CloseBracket,
    /// A primitive value, optionally with its key
    Leaf,
}

/// One displayable row of the projection.
///
/// Every field a renderer needs is populated; records are never patched
/// after projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub kind: LineKind,
    /// Path of the node this row belongs to
    pub path: String,
    pub node_type: NodeType,
    /// Object key, `None` for array elements and the root
    pub key: Option<String>,
    /// Primitive value text (strings escaped, unquoted), empty otherwise
    pub value_text: String,
    pub indent: usize,
    pub is_collapsed: bool,
    pub has_children: bool,
    pub is_array_element: bool,
    /// Last child of its parent: no trailing comma
    pub is_last_child: bool,
    /// `{`, `[`, `}` or `]`; `None` for leaves
    pub bracket: Option<char>,
    /// Direct children of the node, shown on folded summaries
    pub child_count: usize,
    /// Stable real line this row maps to
    pub real_line: usize,
}

impl LineRecord {
    /// Trailing comma for this row, if any.
    pub const fn comma(&self) -> &'static str {
        if self.is_last_child { "" } else { "," }
    }

    /// Folded summary text: `{...}` or `[...]`.
    pub const fn collapsed_summary(&self) -> &'static str {
        match self.node_type {
            NodeType::Array => "[...]",
            _ => "{...}",
        }
    }

    /// Value as it appears in JSON (strings quoted).
    pub fn display_value(&self) -> String {
        match self.node_type {
            NodeType::String => format!("\"{}\"", self.value_text),
            _ => self.value_text.clone(),
        }
    }

    /// Object key escaped the way it appears in JSON, without quotes.
    pub fn display_key(&self) -> Option<String> {
        self.key.as_deref().map(escape_json_string)
    }

    /// Unstyled text of the row without indentation.
    ///
    /// ```
    /// use vj::document::Document;
    ///
    /// let doc = Document::from_json_str(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
    /// let rows: Vec<String> = doc.lines().iter().map(|l| l.plain_text()).collect();
    /// assert_eq!(rows, vec!["{", "\"a\": 1,", "\"b\": [", "2,", "3", "]", "}"]);
    /// ```
    pub fn plain_text(&self) -> String {
        let key_prefix = self
            .display_key()
            .map(|key| format!("\"{key}\": "))
            .unwrap_or_default();
        match self.kind {
            LineKind::OpenBracket | LineKind::OpenBracketWithKey => {
                if self.is_collapsed {
                    format!("{key_prefix}{}{}", self.collapsed_summary(), self.comma())
                } else {
                    let bracket = self.bracket.map(String::from).unwrap_or_default();
                    format!("{key_prefix}{bracket}")
                }
            }
            LineKind::CloseBracket => {
                let bracket = self.bracket.map(String::from).unwrap_or_default();
                format!("{bracket}{}", self.comma())
            }
            LineKind::Leaf => format!("{key_prefix}{}{}", self.display_value(), self.comma()),
        }
    }

    /// Unstyled text with two spaces of indentation per level.
    pub fn indented_text(&self) -> String {
        format!("{}{}", "  ".repeat(self.indent), self.plain_text())
    }
}

/// A tree walked under one fold state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    lines: Vec<LineRecord>,
    virtual_to_real: Vec<usize>,
    real_to_virtual: HashMap<usize, usize>,
}

impl Projection {
    pub(crate) fn from_lines(lines: Vec<LineRecord>) -> Self {
        let virtual_to_real: Vec<usize> = lines.iter().map(|line| line.real_line).collect();
        let real_to_virtual = virtual_to_real
            .iter()
            .enumerate()
            .map(|(virtual_line, &real)| (real, virtual_line))
            .collect();
        Self {
            lines,
            virtual_to_real,
            real_to_virtual,
        }
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn line_at(&self, virtual_line: usize) -> Option<&LineRecord> {
        self.lines.get(virtual_line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Virtual line index → real line number.
    pub fn virtual_to_real(&self) -> &[usize] {
        &self.virtual_to_real
    }

    /// Real line of a virtual line.
    pub fn real_line(&self, virtual_line: usize) -> Option<usize> {
        self.virtual_to_real.get(virtual_line).copied()
    }

    /// Virtual line showing real line `real`, if it is projected.
    pub fn virtual_line(&self, real: usize) -> Option<usize> {
        self.real_to_virtual.get(&real).copied()
    }

    /// Up to `count` records starting at `start`.
    pub fn slice(&self, start: usize, count: usize) -> &[LineRecord] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }
}
