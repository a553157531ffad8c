//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Mode, Model, StatusLine, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;
use crate::ui::viewport::DEFAULT_MARGIN;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    file_path: Option<PathBuf>,
    watch_enabled: bool,
    theme: ThemeMode,
    margin: usize,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application; `file_path` is `None` for stdin input.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            watch_enabled: false,
            theme: ThemeMode::default(),
            margin: DEFAULT_MARGIN,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable file watching.
    #[must_use]
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Rows kept between the cursor and the window edge.
    #[must_use]
    pub const fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
