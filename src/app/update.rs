use crate::app::Model;
use crate::app::model::{Mode, StatusLine, ToastLevel};
use crate::navigation::SiblingDirection;
use crate::search::SearchIndex;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Append a digit to the repeat count
    Digit(u32),
    /// Move the cursor up (repeat count applies)
    MoveUp,
    /// Move the cursor down (repeat count applies)
    MoveDown,
    /// Move the cursor up by n lines
    ScrollUp(usize),
    /// Move the cursor down by n lines
    ScrollDown(usize),
    /// First line, or the counted line
    GoToTop,
    /// Last line, or the counted line
    GoToBottom,
    /// Previous sibling of the node under the cursor
    PrevSibling,
    /// Next sibling of the node under the cursor
    NextSibling,

    // Folding
    /// Fold the container under the cursor
    Collapse,
    /// Unfold the container under the cursor
    Expand,

    // Search
    /// Start typing a search term
    StartSearch,
    /// Go to next search match
    NextMatch,
    /// Go to previous match
    PrevMatch,

    // Command line
    /// Start typing a `:` command
    StartCommand,
    /// Type a character into the active buffer
    InputChar(char),
    /// Delete the last character of the active buffer
    InputBackspace,
    /// Run the command or search
    InputSubmit,
    /// Leave Command or Search mode
    InputCancel,

    // Status
    /// Back to Normal mode showing the cursor path
    ShowPath,
    /// Copy the cursor path to the clipboard
    YankPath,

    // File watching
    /// Toggle file watching
    ToggleWatch,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// File changed externally, reload
    FileChanged,
    /// Force reload file
    ForceReload,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum SearchStep {
    Activate,
    Next,
    Previous,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    let keeps_count = matches!(
        msg,
        Message::Digit(_) | Message::Resize(..) | Message::Redraw | Message::FileChanged
    );

    match msg {
        // Navigation
        Message::Digit(digit) => model.navigator.push_digit(digit),
        Message::MoveUp => {
            model.navigator.move_up(&model.document, &mut model.viewport);
            model.status = StatusLine::Path;
        }
        Message::MoveDown => {
            model.navigator.move_down(&model.document, &mut model.viewport);
            model.status = StatusLine::Path;
        }
        Message::ScrollUp(n) => {
            model
                .navigator
                .move_up_by(&model.document, &mut model.viewport, n);
            model.status = StatusLine::Path;
        }
        Message::ScrollDown(n) => {
            model
                .navigator
                .move_down_by(&model.document, &mut model.viewport, n);
            model.status = StatusLine::Path;
        }
        Message::GoToTop => {
            match model.navigator.take_count() {
                Some(line) => {
                    model
                        .navigator
                        .move_to_line(&model.document, &mut model.viewport, line);
                }
                None => model.navigator.move_to_top(&mut model.viewport),
            }
            model.status = StatusLine::Path;
        }
        Message::GoToBottom => {
            match model.navigator.take_count() {
                Some(line) => {
                    model
                        .navigator
                        .move_to_line(&model.document, &mut model.viewport, line);
                }
                None => model
                    .navigator
                    .move_to_bottom(&model.document, &mut model.viewport),
            }
            model.status = StatusLine::Path;
        }
        Message::PrevSibling => {
            model.navigator.move_to_sibling(
                &model.document,
                &mut model.viewport,
                SiblingDirection::Previous,
            );
            model.status = StatusLine::Path;
        }
        Message::NextSibling => {
            model.navigator.move_to_sibling(
                &model.document,
                &mut model.viewport,
                SiblingDirection::Next,
            );
            model.status = StatusLine::Path;
        }

        // Folding
        Message::Collapse | Message::Expand => {
            let expand = matches!(msg, Message::Expand);
            if model
                .navigator
                .toggle_fold(&mut model.document, &mut model.viewport, expand)
            {
                model.refresh_search();
            }
            model.status = StatusLine::Path;
        }

        // Search
        Message::StartSearch => {
            model.mode = Mode::Search;
            model.search_buffer.clear();
        }
        Message::NextMatch => navigate_search(&mut model, SearchStep::Next),
        Message::PrevMatch => navigate_search(&mut model, SearchStep::Previous),

        // Command line
        Message::StartCommand => {
            model.mode = Mode::Command;
            model.command_buffer.clear();
        }
        Message::InputChar(c) => {
            if (' '..='~').contains(&c)
                && let Some(buffer) = active_buffer(&mut model)
            {
                buffer.push(c);
            }
        }
        Message::InputBackspace => {
            if let Some(buffer) = active_buffer(&mut model) {
                buffer.pop();
            }
        }
        Message::InputSubmit => match model.mode {
            Mode::Command => run_command(&mut model),
            Mode::Search => submit_search(&mut model),
            Mode::Normal | Mode::Error => {}
        },
        Message::InputCancel => {
            if model.mode == Mode::Search {
                model.search = None;
            }
            model.command_buffer.clear();
            model.search_buffer.clear();
            model.mode = Mode::Normal;
            model.status = StatusLine::Path;
        }

        // Status
        Message::ShowPath => {
            model.command_buffer.clear();
            model.mode = Mode::Normal;
            model.status = StatusLine::Path;
        }

        // File watching
        Message::ToggleWatch => {
            if model.file_path.is_some() {
                model.watch_enabled = !model.watch_enabled;
            } else {
                model.show_toast(ToastLevel::Warning, "Nothing to watch: input is stdin");
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        // YankPath/FileChanged/ForceReload: handled in effects
        // Redraw: no state change needed
        Message::YankPath | Message::FileChanged | Message::ForceReload | Message::Redraw => {}

        // Window
        Message::Resize(width, height) => {
            let cursor = model.navigator.cursor();
            model
                .viewport
                .resize(width, height.saturating_sub(1), cursor);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }

    if !keeps_count {
        model.navigator.clear_count();
    }
    model
}

fn active_buffer(model: &mut Model) -> Option<&mut String> {
    match model.mode {
        Mode::Command => Some(&mut model.command_buffer),
        Mode::Search => Some(&mut model.search_buffer),
        Mode::Normal | Mode::Error => None,
    }
}

/// Execute the `:` command line.
///
/// `q` quits, `.path` jumps to a node and a bare number jumps to that
/// line. Anything else switches to Error mode.
fn run_command(model: &mut Model) {
    let buffer = std::mem::take(&mut model.command_buffer);
    let command = buffer.trim();
    model.mode = Mode::Normal;
    model.status = StatusLine::Path;

    if command.is_empty() {
        return;
    }
    if command == "q" {
        model.should_quit = true;
        return;
    }
    if command.starts_with('.') {
        if let Err(err) = model
            .navigator
            .go_to_path(&model.document, &mut model.viewport, command)
        {
            tracing::debug!(command, %err, "path command failed");
            model.show_error(format!("Error: {err}"));
        }
        return;
    }
    if let Ok(line) = command.parse::<usize>() {
        model
            .navigator
            .move_to_line(&model.document, &mut model.viewport, line);
        return;
    }
    model.show_error(format!("Error: Unknown command: {command}"));
}

fn submit_search(model: &mut Model) {
    let term = std::mem::take(&mut model.search_buffer);
    model.mode = Mode::Normal;
    if term.is_empty() {
        model.search = None;
        model.status = StatusLine::Path;
        return;
    }
    model.search = Some(SearchIndex::build(&model.document, &term));
    navigate_search(model, SearchStep::Activate);
}

fn navigate_search(model: &mut Model, step: SearchStep) {
    model.refresh_search();
    let cursor = model.navigator.cursor();
    let Some(index) = model.search.as_mut() else {
        return;
    };
    let found = match step {
        SearchStep::Activate => index.activate(cursor),
        SearchStep::Next => index.next(cursor),
        SearchStep::Previous => index.previous(cursor),
    }
    .map(|hit| hit.virtual_line);

    match found {
        Ok(line) => {
            model
                .navigator
                .jump_to(&model.document, &mut model.viewport, line);
            model.status = StatusLine::Search;
        }
        Err(err) => {
            model.status = StatusLine::Error(err.to_string());
        }
    }
}
