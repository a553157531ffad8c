use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::config::ThemeMode;
use crate::document::{Document, decode};
use crate::navigation::Navigator;
use crate::search::SearchIndex;
use crate::tree::display_path;
use crate::ui::viewport::Viewport;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Input mode, selecting how keys are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a `:` command
    Command,
    /// Typing a `/` search term
    Search,
    /// A command failed; the status bar shows why
    Error,
}

/// What the status bar shows in Normal and Error mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusLine {
    /// `.path` of the node under the cursor
    #[default]
    Path,
    /// Progress of the active search
    Search,
    /// Failure text, drawn in the error style
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Everything the viewer knows. [`update`](super::update) is the only
/// writer apart from the side-effect handlers in the event loop.
#[derive(Debug)]
pub struct Model {
    /// The loaded JSON document and its fold state
    pub document: Document,
    /// Visible window over the projection
    pub viewport: Viewport,
    /// Cursor and pending repeat count
    pub navigator: Navigator,
    pub mode: Mode,
    /// Text typed after `:`
    pub command_buffer: String,
    /// Text typed after `/`
    pub search_buffer: String,
    /// Last submitted search, if any
    pub search: Option<SearchIndex>,
    pub status: StatusLine,
    /// Source file; `None` when reading stdin
    pub file_path: Option<PathBuf>,
    pub watch_enabled: bool,
    pub help_visible: bool,
    pub theme: ThemeMode,
    /// Flag files listed in the help overlay
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    pub should_quit: bool,
}

impl Model {
    /// Create a model for `document` on a terminal of `terminal_size`.
    ///
    /// One row is reserved for the status bar.
    pub fn new(document: Document, terminal_size: (u16, u16)) -> Self {
        let viewport = Viewport::new(
            terminal_size.0,
            terminal_size.1.saturating_sub(1),
            document.line_count(),
        );
        Self {
            document,
            viewport,
            ..Self::default()
        }
    }

    /// Use `margin` rows of scroll context instead of the default.
    #[must_use]
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.viewport = self.viewport.with_margin(margin);
        self
    }

    /// Path of the node under the cursor, `.`-prefixed for display.
    pub fn current_path_display(&self) -> String {
        self.navigator
            .current_path(&self.document)
            .map(display_path)
            .unwrap_or_default()
    }

    /// Re-sync cursor, viewport and search after the projection changed.
    pub(super) fn sync_projection(&mut self) {
        self.navigator.clamp(&self.document, &mut self.viewport);
        self.refresh_search();
    }

    /// Rebuild the search index if a fold edit made it stale.
    pub(super) fn refresh_search(&mut self) {
        if let Some(index) = &self.search
            && index.is_stale(&self.document)
        {
            let term = index.term().to_string();
            self.search = Some(SearchIndex::build(&self.document, &term));
        }
    }

    pub(super) fn show_error(&mut self, message: impl Into<String>) {
        self.mode = Mode::Error;
        self.status = StatusLine::Error(message.into());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Re-read the source file and swap in the new tree.
    ///
    /// Folds survive for paths that are still containers. On a read or
    /// decode failure the current document is kept.
    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            anyhow::bail!("input was read from stdin");
        };
        let bytes =
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let value = decode(&bytes)?;
        self.document.reload(&value);
        self.sync_projection();
        tracing::debug!(
            path = %path.display(),
            lines = self.document.line_count(),
            "reloaded document"
        );
        Ok(())
    }
}

// Placeholder left behind by `std::mem::take` in the event loop.
impl Default for Model {
    fn default() -> Self {
        Self {
            document: Document::default(),
            viewport: Viewport::new(80, 23, 0),
            navigator: Navigator::new(),
            mode: Mode::Normal,
            command_buffer: String::new(),
            search_buffer: String::new(),
            search: None,
            status: StatusLine::Path,
            file_path: None,
            watch_enabled: false,
            help_visible: false,
            theme: ThemeMode::default(),
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
        }
    }
}
