use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k or Up/Down", "Move cursor (count prefix repeats)"),
            ("PageUp/PageDown", "Move one page"),
            ("g / G", "Top / bottom"),
            ("{count}G", "Go to line"),
            ("{ / }", "Previous / next sibling"),
            ("h / Left", "Collapse"),
            ("l / Right", "Expand"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Search keys and values"),
            ("n / N", "Next / previous match"),
            ("Esc", "Cancel search input"),
        ],
    ),
    (
        "Commands",
        &[
            (":.path", "Jump to path, e.g. :.users[0].name"),
            (":N", "Go to line N"),
            (":q", "Quit"),
        ],
    ),
    (
        "Other",
        &[
            ("Esc", "Show current path"),
            ("y", "Copy current path"),
            ("w", "Toggle watch"),
            ("r / R", "Reload file"),
            ("q / Ctrl-c", "Quit"),
            ("? / F1", "Toggle help"),
        ],
    ),
];

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let shown = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    let global_cfg = shown(model.config_global_path.as_ref(), "<unknown>");
    let local_cfg = shown(model.config_local_path.as_ref(), "<none>");

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .flat_map(|(section, bindings)| {
            std::iter::once(Line::styled(*section, section_style))
                .chain(
                    bindings
                        .iter()
                        .map(|(keys, action)| Line::raw(format!("  {keys:<20}{action}"))),
                )
                .chain(std::iter::once(Line::default()))
        })
        .collect();
    lines.extend([
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
        Line::default(),
        Line::styled("Any key closes", dim_style),
    ]);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// `width`x`height` box in the middle of `area`, shrunk to fit.
fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    popup
}
