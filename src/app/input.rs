use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::model::Mode;
use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.mode != Mode::Normal {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_STEP)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_STEP)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'q'))
        {
            return Some(Message::Quit);
        }

        match model.mode {
            Mode::Command | Mode::Search => Self::handle_input_key(key),
            Mode::Error => match key.code {
                KeyCode::Esc => Some(Message::ShowPath),
                KeyCode::Enter | KeyCode::Char(':') => Some(Message::StartCommand),
                _ => None,
            },
            Mode::Normal => Self::handle_normal_key(key, model),
        }
    }

    fn handle_input_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::InputCancel),
            KeyCode::Enter => Some(Message::InputSubmit),
            KeyCode::Backspace => Some(Message::InputBackspace),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::InputChar(c))
            }
            _ => None,
        }
    }

    fn handle_normal_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let page = usize::from(model.viewport.height().max(1));
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => c.to_digit(10).map(Message::Digit),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Message::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveUp),
            KeyCode::PageDown => Some(Message::ScrollDown(page)),
            KeyCode::PageUp => Some(Message::ScrollUp(page)),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('{') => Some(Message::PrevSibling),
            KeyCode::Char('}') => Some(Message::NextSibling),

            // Folding
            KeyCode::Char('h') | KeyCode::Left => Some(Message::Collapse),
            KeyCode::Char('l') | KeyCode::Right => Some(Message::Expand),

            // Search and commands
            KeyCode::Char('/') => Some(Message::StartSearch),
            KeyCode::Char('n') => Some(Message::NextMatch),
            KeyCode::Char('N') => Some(Message::PrevMatch),
            KeyCode::Char(':') => Some(Message::StartCommand),

            // Other
            KeyCode::Esc => Some(Message::ShowPath),
            KeyCode::Char('y') => Some(Message::YankPath),
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }
}
