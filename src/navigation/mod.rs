//! Cursor movement over the projection.
//!
//! The cursor is a virtual line index. Structural moves resolve it to a
//! node through the document's virtual → real map and back.

use crate::document::Document;
use crate::error::NavResult;
use crate::tree::normalize_user_path;
use crate::ui::viewport::Viewport;

/// Largest repeat count accepted; more digits keep it here.
pub const MAX_REPEAT: usize = 99_999;

/// Direction of a sibling jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingDirection {
    Previous,
    Next,
}

/// Cursor position plus a pending vi-style repeat count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    cursor: usize,
    count: Option<usize>,
}

impl Navigator {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            count: None,
        }
    }

    /// Current virtual line.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Count typed so far, if any.
    pub const fn pending_count(&self) -> Option<usize> {
        self.count
    }

    /// Append a digit to the pending count.
    pub fn push_digit(&mut self, digit: u32) {
        let digit = digit.min(9) as usize;
        let next = self
            .count
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(digit);
        self.count = Some(next.min(MAX_REPEAT));
    }

    pub const fn clear_count(&mut self) {
        self.count = None;
    }

    /// Consume the pending count. A typed `0` counts as 1.
    pub fn take_count(&mut self) -> Option<usize> {
        match self.count.take() {
            Some(0) => Some(1),
            other => other,
        }
    }

    pub fn move_up(&mut self, doc: &Document, viewport: &mut Viewport) {
        let steps = self.take_count().unwrap_or(1);
        self.move_up_by(doc, viewport, steps);
    }

    pub fn move_down(&mut self, doc: &Document, viewport: &mut Viewport) {
        let steps = self.take_count().unwrap_or(1);
        self.move_down_by(doc, viewport, steps);
    }

    /// Move up `steps` lines without touching the pending count.
    pub fn move_up_by(&mut self, doc: &Document, viewport: &mut Viewport, steps: usize) {
        self.cursor = self.cursor.saturating_sub(steps).min(last_line(doc));
        viewport.scroll_up(self.cursor);
    }

    /// Move down `steps` lines without touching the pending count.
    pub fn move_down_by(&mut self, doc: &Document, viewport: &mut Viewport, steps: usize) {
        self.cursor = self.cursor.saturating_add(steps).min(last_line(doc));
        viewport.scroll_down(self.cursor);
    }

    pub fn move_to_top(&mut self, viewport: &mut Viewport) {
        self.count = None;
        self.cursor = 0;
        viewport.scroll_up(self.cursor);
    }

    pub fn move_to_bottom(&mut self, doc: &Document, viewport: &mut Viewport) {
        self.count = None;
        self.cursor = last_line(doc);
        viewport.scroll_down(self.cursor);
    }

    /// Jump to 1-based real line `line`, the number the gutter shows.
    ///
    /// A line hidden inside a folded node lands on that node's summary.
    pub fn move_to_line(&mut self, doc: &Document, viewport: &mut Viewport, line: usize) {
        let real = line.saturating_sub(1);
        let target = doc
            .projection()
            .virtual_to_real()
            .partition_point(|&r| r <= real)
            .saturating_sub(1);
        self.jump_to(doc, viewport, target);
    }

    /// Put the cursor on `virtual_line` (clamped) and scroll it into view.
    pub fn jump_to(&mut self, doc: &Document, viewport: &mut Viewport, virtual_line: usize) {
        self.count = None;
        self.cursor = virtual_line.min(last_line(doc));
        viewport.reveal(self.cursor);
    }

    /// Step to the previous or next visible sibling of the node under the
    /// cursor. Returns false when there is nowhere to go.
    pub fn move_to_sibling(
        &mut self,
        doc: &Document,
        viewport: &mut Viewport,
        direction: SiblingDirection,
    ) -> bool {
        self.count = None;
        let Some(current) = doc.node_at_virtual(self.cursor) else {
            return false;
        };
        let Some(parent) = doc.tree().parent(&current.path) else {
            return false;
        };
        let siblings: Vec<(&str, usize)> = doc
            .tree()
            .children(&parent.path)
            .filter_map(|node| {
                doc.projection()
                    .virtual_line(node.line)
                    .map(|line| (node.path.as_str(), line))
            })
            .collect();
        let Some(idx) = siblings.iter().position(|(path, _)| *path == current.path) else {
            return false;
        };
        let target = match direction {
            SiblingDirection::Previous => idx.checked_sub(1),
            SiblingDirection::Next => Some(idx + 1),
        };
        let Some(&(_, line)) = target.and_then(|i| siblings.get(i)) else {
            return false;
        };
        self.cursor = line;
        match direction {
            SiblingDirection::Previous => viewport.scroll_up(line),
            SiblingDirection::Next => viewport.scroll_down(line),
        }
        true
    }

    /// Fold (`expand == false`) or unfold the composite under the cursor.
    ///
    /// The cursor keeps its index; it is only clamped to the new length.
    /// Returns true if the projection changed.
    pub fn toggle_fold(&mut self, doc: &mut Document, viewport: &mut Viewport, expand: bool) -> bool {
        self.count = None;
        let Some(path) = doc
            .node_at_virtual(self.cursor)
            .filter(|node| node.is_composite())
            .map(|node| node.path.clone())
        else {
            return false;
        };
        let changed = if expand {
            doc.expand(&path)
        } else {
            doc.collapse(&path)
        };
        if changed {
            self.clamp(doc, viewport);
        }
        changed
    }

    /// Move to the node addressed by user input such as `.users[0].name`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no node has that path, `NotVisible` if it sits inside
    /// a folded node.
    pub fn go_to_path(&mut self, doc: &Document, viewport: &mut Viewport, input: &str) -> NavResult<()> {
        let line = doc.virtual_line_of(normalize_user_path(input))?;
        self.jump_to(doc, viewport, line);
        Ok(())
    }

    /// Path of the node under the cursor.
    pub fn current_path<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        doc.node_at_virtual(self.cursor).map(|node| node.path.as_str())
    }

    /// Re-sync with a changed projection: clamp the cursor and the window.
    pub fn clamp(&mut self, doc: &Document, viewport: &mut Viewport) {
        self.cursor = self.cursor.min(last_line(doc));
        viewport.set_total_lines(doc.line_count());
        viewport.reveal(self.cursor);
    }
}

fn last_line(doc: &Document) -> usize {
    doc.line_count().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    const SAMPLE: &str = r#"{"a":1,"b":[2,3]}"#;

    fn setup(src: &str) -> (Document, Viewport, Navigator) {
        let doc = Document::from_json_str(src).unwrap();
        let vp = Viewport::new(80, 20, doc.line_count());
        (doc, vp, Navigator::new())
    }

    #[test]
    fn test_move_down_and_up_clamp() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        nav.move_up(&doc, &mut vp);
        assert_eq!(nav.cursor(), 0);
        for _ in 0..20 {
            nav.move_down(&doc, &mut vp);
        }
        assert_eq!(nav.cursor(), 6);
    }

    #[test]
    fn test_count_repeats_motion() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        nav.push_digit(3);
        nav.move_down(&doc, &mut vp);
        assert_eq!(nav.cursor(), 3);
        assert_eq!(nav.pending_count(), None);
        nav.move_down(&doc, &mut vp);
        assert_eq!(nav.cursor(), 4);
    }

    #[test]
    fn test_count_saturates() {
        let mut nav = Navigator::new();
        for _ in 0..12 {
            nav.push_digit(9);
        }
        assert_eq!(nav.pending_count(), Some(MAX_REPEAT));
        nav.clear_count();
        nav.push_digit(0);
        assert_eq!(nav.take_count(), Some(1));
    }

    #[test]
    fn test_top_and_bottom() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        nav.move_to_bottom(&doc, &mut vp);
        assert_eq!(nav.cursor(), 6);
        nav.move_to_top(&mut vp);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn test_move_to_line_uses_real_numbers() {
        let (mut doc, mut vp, mut nav) = setup(SAMPLE);
        nav.move_to_line(&doc, &mut vp, 4);
        assert_eq!(nav.current_path(&doc), Some("b[0]"));
        doc.collapse("b");
        nav.clamp(&doc, &mut vp);
        nav.move_to_line(&doc, &mut vp, 5);
        assert_eq!(nav.cursor(), 2);
        nav.move_to_line(&doc, &mut vp, 7);
        assert_eq!(nav.cursor(), 3);
        nav.move_to_line(&doc, &mut vp, 0);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn test_siblings() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        nav.jump_to(&doc, &mut vp, 1);
        assert!(nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next));
        assert_eq!(nav.cursor(), 2);
        assert!(!nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next));
        assert_eq!(nav.cursor(), 2);
        assert!(nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Previous));
        assert_eq!(nav.cursor(), 1);
        assert!(!nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Previous));
    }

    #[test]
    fn test_sibling_at_root_is_noop() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        assert!(!nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next));
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn test_sibling_without_siblings_is_noop() {
        let (doc, mut vp, mut nav) = setup(r#"{"only": [1]}"#);
        nav.jump_to(&doc, &mut vp, 1);
        assert!(!nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next));
        assert!(!nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Previous));
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn test_sibling_from_closing_bracket() {
        let (doc, mut vp, mut nav) = setup(r#"{"a":[1],"b":2}"#);
        nav.jump_to(&doc, &mut vp, 3);
        assert!(nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next));
        assert_eq!(nav.current_path(&doc), Some("b"));
    }

    #[test]
    fn test_toggle_fold_keeps_cursor_index() {
        let (mut doc, mut vp, mut nav) = setup(SAMPLE);
        nav.jump_to(&doc, &mut vp, 2);
        assert!(nav.toggle_fold(&mut doc, &mut vp, false));
        assert_eq!(doc.line_count(), 4);
        assert_eq!(nav.cursor(), 2);
        assert_eq!(vp.total_lines(), 4);
        assert!(nav.toggle_fold(&mut doc, &mut vp, true));
        assert_eq!(doc.line_count(), 7);
    }

    #[test]
    fn test_toggle_fold_on_leaf_is_noop() {
        let (mut doc, mut vp, mut nav) = setup(SAMPLE);
        nav.jump_to(&doc, &mut vp, 1);
        assert!(!nav.toggle_fold(&mut doc, &mut vp, false));
        assert_eq!(doc.line_count(), 7);
    }

    #[test]
    fn test_fold_from_closing_line_clamps_cursor() {
        let (mut doc, mut vp, mut nav) = setup(SAMPLE);
        nav.jump_to(&doc, &mut vp, 6);
        assert!(nav.toggle_fold(&mut doc, &mut vp, false));
        assert_eq!(doc.line_count(), 1);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn test_go_to_path() {
        let (mut doc, mut vp, mut nav) = setup(SAMPLE);
        nav.go_to_path(&doc, &mut vp, ".b[1]").unwrap();
        assert_eq!(nav.cursor(), 4);
        assert_eq!(
            nav.go_to_path(&doc, &mut vp, ".c"),
            Err(NavError::NotFound("c".into()))
        );
        doc.collapse("b");
        nav.clamp(&doc, &mut vp);
        assert_eq!(
            nav.go_to_path(&doc, &mut vp, ".b[1]"),
            Err(NavError::NotVisible("b[1]".into()))
        );
        assert_eq!(nav.cursor(), 3);
    }

    #[test]
    fn test_current_path_resolves_closing_lines() {
        let (doc, mut vp, mut nav) = setup(SAMPLE);
        nav.jump_to(&doc, &mut vp, 5);
        assert_eq!(nav.current_path(&doc), Some("b"));
    }

    #[test]
    fn test_cursor_stays_visible_while_scrolling() {
        let src = format!("[{}]", (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(","));
        let doc = Document::from_json_str(&src).unwrap();
        let mut vp = Viewport::new(80, 10, doc.line_count());
        let mut nav = Navigator::new();
        for _ in 0..150 {
            nav.move_down(&doc, &mut vp);
            assert!(vp.visible_range().contains(&nav.cursor()));
        }
        for _ in 0..150 {
            nav.move_up(&doc, &mut vp);
            assert!(vp.visible_range().contains(&nav.cursor()));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn nested_source(groups: usize, width: usize) -> String {
            let group: Vec<String> = (0..groups)
                .map(|g| {
                    let items: Vec<String> = (0..width).map(|i| (g * i).to_string()).collect();
                    format!(r#"{{"id": {g}, "items": [{}], "meta": {{"k": "v{g}"}}}}"#, items.join(","))
                })
                .collect();
            format!(r#"{{"groups": [{}], "tail": null}}"#, group.join(","))
        }

        proptest! {
            #[test]
            fn cursor_stays_in_range_and_on_screen(
                groups in 0..6usize,
                width in 0..6usize,
                height in 1..30u16,
                ops in prop::collection::vec((0..10u8, 0..40usize), 0..60),
            ) {
                let mut doc = Document::from_json_str(&nested_source(groups, width)).unwrap();
                let mut vp = Viewport::new(80, height, doc.line_count());
                let mut nav = Navigator::new();

                for (op, arg) in ops {
                    match op {
                        0 => nav.move_down(&doc, &mut vp),
                        1 => nav.move_up(&doc, &mut vp),
                        2 => nav.move_down_by(&doc, &mut vp, arg),
                        3 => nav.move_up_by(&doc, &mut vp, arg),
                        4 => {
                            nav.toggle_fold(&mut doc, &mut vp, false);
                        }
                        5 => {
                            nav.toggle_fold(&mut doc, &mut vp, true);
                        }
                        6 => {
                            nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Next);
                        }
                        7 => {
                            nav.move_to_sibling(&doc, &mut vp, SiblingDirection::Previous);
                        }
                        8 => nav.move_to_line(&doc, &mut vp, arg),
                        _ => nav.move_to_bottom(&doc, &mut vp),
                    }
                    prop_assert!(nav.cursor() < doc.line_count());
                    prop_assert_eq!(vp.total_lines(), doc.line_count());
                    let visible = vp.visible_range();
                    prop_assert!(visible.contains(&nav.cursor()));
                }
            }
        }
    }
}
