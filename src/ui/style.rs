//! Theming and line styling.
//!
//! A [`Theme`] is a plain value handed to the renderer; nothing here reads
//! global state.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::ThemeMode;
use crate::projection::{LineKind, LineRecord};
use crate::tree::NodeType;

/// Styles for every element the tree view draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: Style,
    pub string: Style,
    pub number: Style,
    pub boolean: Style,
    pub null: Style,
    /// Brackets, quotes, colons and commas
    pub syntax: Style,
    /// `// N items` or `// N properties` after a folded container
    pub summary: Style,
    pub line_number: Style,
    /// Applied over the first glyph of the cursor row
    pub cursor: Style,
    /// Applied over rows holding a search hit
    pub search_hit: Style,
    /// `~` rows past the end of the document
    pub blank: Style,
    pub status_bar: Style,
    pub error: Style,
}

impl Theme {
    pub fn dark() -> Self {
        let muted = Color::Rgb(0x56, 0x5f, 0x89);
        Self {
            key: Style::default().fg(Color::Rgb(0x7d, 0xcf, 0xff)),
            string: Style::default().fg(Color::Rgb(0x9e, 0xce, 0x6a)),
            number: Style::default().fg(Color::Rgb(0xff, 0x9e, 0x64)),
            boolean: Style::default().fg(Color::Rgb(0xff, 0x9e, 0x64)),
            null: Style::default().fg(muted),
            syntax: Style::default(),
            summary: Style::default().fg(muted).add_modifier(Modifier::DIM),
            line_number: Style::default().fg(muted),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            search_hit: Style::default().bg(Color::Rgb(0x41, 0x48, 0x68)),
            blank: Style::default().fg(muted),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    pub fn light() -> Self {
        let muted = Color::Rgb(0x58, 0x60, 0x69);
        Self {
            key: Style::default().fg(Color::Rgb(0x00, 0x66, 0xcc)),
            string: Style::default().fg(Color::Rgb(0x22, 0x86, 0x3a)),
            number: Style::default().fg(Color::Rgb(0x00, 0x5c, 0xc5)),
            boolean: Style::default().fg(Color::Rgb(0xd7, 0x3a, 0x49)),
            null: Style::default().fg(Color::Rgb(0x6f, 0x42, 0xc1)),
            syntax: Style::default(),
            summary: Style::default().fg(muted).add_modifier(Modifier::DIM),
            line_number: Style::default().fg(muted),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            search_hit: Style::default().bg(Color::Indexed(229)),
            blank: Style::default().fg(muted),
            status_bar: Style::default().bg(Color::Indexed(4)).fg(Color::White),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Only modifiers, for terminals without color.
    pub fn no_color() -> Self {
        Self {
            key: Style::default(),
            string: Style::default(),
            number: Style::default(),
            boolean: Style::default(),
            null: Style::default(),
            syntax: Style::default(),
            summary: Style::default().add_modifier(Modifier::DIM),
            line_number: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            search_hit: Style::default().add_modifier(Modifier::UNDERLINED),
            blank: Style::default(),
            status_bar: Style::default().add_modifier(Modifier::REVERSED),
            error: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::NoColor => Self::no_color(),
        }
    }

    /// Style for a primitive value of `node_type`.
    pub fn value_style(&self, node_type: NodeType) -> Style {
        match node_type {
            NodeType::String => self.string,
            NodeType::Number => self.number,
            NodeType::Boolean => self.boolean,
            NodeType::Null => self.null,
            NodeType::Object | NodeType::Array => self.syntax,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Build the styled text of one projected row, without the gutter.
///
/// With `has_cursor` the first visible glyph takes the cursor style.
pub fn render_line(line: &LineRecord, has_cursor: bool, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if let Some(key) = line.display_key() {
        spans.push(Span::styled("\"", theme.syntax));
        spans.push(Span::styled(key, theme.key));
        spans.push(Span::styled("\": ", theme.syntax));
    }

    let bracket = line.bracket.map(String::from).unwrap_or_default();
    match line.kind {
        LineKind::Leaf => {
            spans.push(Span::styled(
                line.display_value(),
                theme.value_style(line.node_type),
            ));
            spans.push(Span::styled(line.comma(), theme.syntax));
        }
        LineKind::OpenBracket | LineKind::OpenBracketWithKey if line.is_collapsed => {
            spans.push(Span::styled(line.collapsed_summary(), theme.syntax));
            spans.push(Span::styled(line.comma(), theme.syntax));
            spans.push(Span::styled(
                format!(" // {}", child_summary(line.node_type, line.child_count)),
                theme.summary,
            ));
        }
        LineKind::OpenBracket | LineKind::OpenBracketWithKey => {
            spans.push(Span::styled(bracket, theme.syntax));
        }
        LineKind::CloseBracket => {
            spans.push(Span::styled(bracket, theme.syntax));
            spans.push(Span::styled(line.comma(), theme.syntax));
        }
    }

    if has_cursor {
        mark_cursor(&mut spans, theme.cursor);
    }
    spans.retain(|span| !span.content.is_empty());
    spans.insert(0, Span::raw("  ".repeat(line.indent)));
    Line::from(spans)
}

/// `3 items` for arrays, `3 properties` for objects.
fn child_summary(node_type: NodeType, count: usize) -> String {
    let (one, many) = match node_type {
        NodeType::Array => ("item", "items"),
        _ => ("property", "properties"),
    };
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Split the first glyph off the first non-empty span and restyle it.
fn mark_cursor(spans: &mut Vec<Span<'static>>, cursor: Style) {
    let Some(idx) = spans.iter().position(|span| !span.content.is_empty()) else {
        return;
    };
    let span = &spans[idx];
    let mut chars = span.content.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let rest = chars.as_str().to_string();
    let style = span.style;
    spans[idx] = Span::styled(first.to_string(), style.patch(cursor));
    if !rest.is_empty() {
        spans.insert(idx + 1, Span::styled(rest, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_rendered_text_matches_plain_text() {
        let doc = Document::from_json_str(r#"{"a": 1, "b": [true, null, "x"]}"#).unwrap();
        let theme = Theme::dark();
        for line in doc.lines() {
            assert_eq!(text(&render_line(line, false, &theme)), line.indented_text());
        }
    }

    #[test]
    fn test_key_and_value_styles() {
        let doc = Document::from_json_str(r#"{"name": "vj"}"#).unwrap();
        let theme = Theme::dark();
        let line = render_line(&doc.lines()[1], false, &theme);
        let key = line.spans.iter().find(|s| s.content == "name").unwrap();
        assert_eq!(key.style, theme.key);
        let value = line.spans.iter().find(|s| s.content == "\"vj\"").unwrap();
        assert_eq!(value.style, theme.string);
    }

    #[test]
    fn test_collapsed_container_shows_item_count() {
        let mut doc = Document::from_json_str(r#"{"a": [1, 2, 3], "b": {"c": 1}}"#).unwrap();
        doc.collapse("a");
        doc.collapse("b");
        let theme = Theme::dark();

        let a = render_line(&doc.lines()[1], false, &theme);
        assert_eq!(text(&a), "  \"a\": [...], // 3 items");
        let summary = a.spans.last().unwrap();
        assert_eq!(summary.style, theme.summary);

        let b = render_line(&doc.lines()[2], false, &theme);
        assert_eq!(text(&b), "  \"b\": {...} // 1 property");
    }

    #[test]
    fn test_folded_object_counts_properties() {
        let mut doc = Document::from_json_str(r#"{"o": {"x": 1, "y": 2}, "e": []}"#).unwrap();
        doc.collapse("o");
        doc.collapse("e");
        let theme = Theme::dark();
        assert_eq!(
            text(&render_line(&doc.lines()[1], false, &theme)),
            "  \"o\": {...}, // 2 properties"
        );
        assert_eq!(
            text(&render_line(&doc.lines()[2], false, &theme)),
            "  \"e\": [...] // 0 items"
        );
    }

    #[test]
    fn test_keys_are_escaped() {
        let doc = Document::from_json_str(r#"{"say \"hi\"\n": 1}"#).unwrap();
        let theme = Theme::dark();
        let line = &doc.lines()[1];
        assert_eq!(line.key.as_deref(), Some("say \"hi\"\n"));
        let rendered = text(&render_line(line, false, &theme));
        assert_eq!(rendered, r#"  "say \"hi\"\n": 1"#);
        assert_eq!(rendered, line.indented_text());
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_cursor_marks_first_glyph() {
        let doc = Document::from_json_str(r#"{"a": 1}"#).unwrap();
        let theme = Theme::dark();
        let line = render_line(&doc.lines()[1], true, &theme);
        assert_eq!(text(&line), "  \"a\": 1");
        assert_eq!(line.spans[1].content, "\"");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::REVERSED));
        assert!(
            line.spans[2..]
                .iter()
                .all(|s| !s.style.add_modifier.contains(Modifier::REVERSED))
        );
    }

    #[test]
    fn test_cursor_on_array_element_value() {
        let doc = Document::from_json_str("[42]").unwrap();
        let theme = Theme::no_color();
        let line = render_line(&doc.lines()[1], true, &theme);
        assert_eq!(line.spans[1].content, "4");
        assert_eq!(line.spans[2].content, "2");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_theme_from_mode() {
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::from_mode(ThemeMode::NoColor).key, Style::default());
    }
}
