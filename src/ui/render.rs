use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;

use super::style::{Theme, render_line};
use super::{overlays, status};

/// Columns taken by line numbers, before the separating space.
pub const GUTTER_WIDTH: usize = 5;

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::from_mode(model.theme);
    let [tree_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    render_tree(model, &theme, frame, tree_area);
    status::render_status_bar(model, &theme, frame, status_area);

    if model.active_toast().is_some() && tree_area.height > 0 {
        let toast_area = Rect::new(tree_area.x, tree_area.bottom() - 1, tree_area.width, 1);
        frame.render_widget(Clear, toast_area);
        status::render_toast_bar(model, frame, toast_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_tree(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let cursor = model.navigator.cursor();
    let offset = model.viewport.offset();
    let rows = model.viewport.slice(model.document.lines());

    let mut lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .take(area.height as usize)
        .map(|(row, record)| {
            let virtual_line = offset + row;
            let has_cursor = virtual_line == cursor;
            let mut spans = vec![Span::styled(
                gutter_label(virtual_line, cursor, record.real_line),
                theme.line_number,
            )];
            let mut content = render_line(record, has_cursor, theme);
            if model
                .search
                .as_ref()
                .is_some_and(|search| search.is_match_line(virtual_line))
            {
                content = content.patch_style(theme.search_hit);
            }
            let line_style = content.style;
            spans.extend(content.spans.into_iter().map(|mut span| {
                span.style = line_style.patch(span.style);
                span
            }));
            Line::from(spans)
        })
        .collect();

    while lines.len() < area.height as usize {
        lines.push(Line::styled("~", theme.blank));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Gutter text for a row.
///
/// The cursor row shows its 1-based real line number, nudged one column
/// left; every other row shows its distance from the cursor.
pub fn gutter_label(virtual_line: usize, cursor: usize, real_line: usize) -> String {
    if virtual_line == cursor {
        format!("{:>width$} ", format!("{} ", real_line + 1), width = GUTTER_WIDTH)
    } else {
        format!("{:>width$} ", virtual_line.abs_diff(cursor), width = GUTTER_WIDTH)
    }
}
