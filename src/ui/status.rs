use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model, StatusLine, ToastLevel};

use super::style::Theme;

/// Left-hand status text and whether it is an error.
pub fn status_text(model: &Model) -> (String, bool) {
    match model.mode {
        Mode::Command => (format!(":{}\u{2588}", model.command_buffer), false),
        Mode::Search => (format!("/{}\u{2588}", model.search_buffer), false),
        Mode::Normal | Mode::Error => match &model.status {
            StatusLine::Error(message) => (message.clone(), true),
            StatusLine::Search => match &model.search {
                Some(search) => (search.status(), search.is_empty()),
                None => (model.current_path_display(), false),
            },
            StatusLine::Path => (model.current_path_display(), false),
        },
    }
}

/// Right-hand position summary.
pub fn position_text(model: &Model) -> String {
    let count = model
        .navigator
        .pending_count()
        .map(|n| format!("{n}  "))
        .unwrap_or_default();
    let watch = if model.watch_enabled { "[watching]  " } else { "" };
    format!(
        "{count}{watch}{}/{}  {}%  ?:help ",
        model.navigator.cursor() + 1,
        model.document.line_count(),
        model.viewport.scroll_percent()
    )
}

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let (left, is_error) = status_text(model);
    let right = position_text(model);
    let right_width = u16::try_from(right.chars().count())
        .unwrap_or(u16::MAX)
        .min(area.width);
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

    let left_style = if is_error {
        theme.status_bar.patch(theme.error)
    } else {
        theme.status_bar
    };
    frame.render_widget(
        Paragraph::new(format!(" {left}")).style(left_style),
        left_area,
    );
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(theme.status_bar),
        right_area,
    );
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
