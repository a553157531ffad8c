use std::io::{Write, stdout};
use std::path::Path;

use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::{DEFAULT_DEBOUNCE, FileWatcher};

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path, DEFAULT_DEBOUNCE)
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => Self::sync_watcher(model, file_watcher),
            Message::ForceReload | Message::FileChanged => {
                if let Err(err) = model.reload_from_disk() {
                    tracing::warn!(error = %format!("{err:#}"), "reload failed");
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                } else if matches!(msg, Message::ForceReload) {
                    model.show_toast(ToastLevel::Info, "Reloaded");
                }
            }
            Message::YankPath => Self::yank_path(model),
            _ => {}
        }
    }

    fn sync_watcher(model: &mut Model, file_watcher: &mut Option<FileWatcher>) {
        if !model.watch_enabled {
            if file_watcher.take().is_some() {
                model.show_toast(ToastLevel::Info, "Watch disabled");
            }
            return;
        }
        let Some(path) = model.file_path.clone() else {
            model.watch_enabled = false;
            return;
        };
        match Self::make_file_watcher(&path) {
            Ok(watcher) => {
                *file_watcher = Some(watcher);
                model.show_toast(ToastLevel::Info, "Watching file changes");
            }
            Err(err) => {
                model.watch_enabled = false;
                *file_watcher = None;
                tracing::warn!(path = %path.display(), %err, "watcher unavailable");
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
            }
        }
    }

    fn yank_path(model: &mut Model) {
        let path = model.current_path_display();
        if path.is_empty() {
            return;
        }
        match write_osc52(&mut stdout(), &path) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Copied {path}")),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
        }
    }
}

/// Ask the terminal to put `text` on the system clipboard (OSC 52).
fn write_osc52(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    write!(out, "\x1b]52;c;{encoded}\x07")?;
    out.flush()
}
