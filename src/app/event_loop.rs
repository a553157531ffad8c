use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::document::Document;
use crate::watcher::FileWatcher;

/// Poll interval while something is waiting to settle.
const BUSY_POLL: Duration = Duration::from_millis(50);
/// Poll interval when idle.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Quiet time before a resize is applied.
const RESIZE_SETTLE_MS: u64 = 100;

/// Holds the latest terminal size until resizing has settled.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    size: Option<(u16, u16)>,
    due_ms: u64,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            size: None,
            due_ms: 0,
        }
    }

    /// Remember `width`x`height`, pushing the deadline back.
    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.size = Some((width, height));
        self.due_ms = now_ms.saturating_add(self.delay_ms);
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        if now_ms < self.due_ms {
            return None;
        }
        self.size.take()
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.size.is_some()
    }
}

/// Milliseconds since `start`, for the debouncers.
fn millis_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl App {
    /// Run the viewer over `document` until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or reading
    /// terminal events fails.
    pub fn run(&mut self, document: Document) -> Result<()> {
        let _run_scope = crate::logging::scope("app.run");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: vj needs an interactive terminal")?;
        let size = terminal.size()?;
        let mut model = self.initial_model(document, (size.width, size.height));
        tracing::debug!(
            width = size.width,
            height = size.height,
            lines = model.document.line_count(),
            "starting event loop"
        );

        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Best effort: the terminal is restored even if this fails.
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn initial_model(&self, document: Document, size: (u16, u16)) -> Model {
        let mut model = Model::new(document, size).with_margin(self.margin);
        model.file_path.clone_from(&self.file_path);
        model.watch_enabled = self.watch_enabled && self.file_path.is_some();
        model.theme = self.theme;
        model.config_global_path.clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }

    fn dispatch(model: &mut Model, file_watcher: &mut Option<FileWatcher>, msg: Message) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, file_watcher, &side_msg);
    }

    /// Watcher for the startup `--watch` flag. Failure downgrades to a toast.
    fn startup_watcher(model: &mut Model) -> Option<FileWatcher> {
        let path = model.file_path.clone().filter(|_| model.watch_enabled)?;
        Self::make_file_watcher(&path)
            .inspect_err(|err| {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!(path = %path.display(), %err, "watcher unavailable");
            })
            .ok()
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resizes = ResizeDebouncer::new(RESIZE_SETTLE_MS);
        let mut file_watcher = Self::startup_watcher(model);
        let mut dirty = true;

        while !model.should_quit {
            dirty |= model.expire_toast(Instant::now());

            if let Some((width, height)) = resizes.take_ready(millis_since(start)) {
                Self::dispatch(model, &mut file_watcher, Message::Resize(width, height));
                dirty = true;
            }

            let changed = model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready);
            if changed {
                Self::dispatch(model, &mut file_watcher, Message::FileChanged);
                dirty = true;
            }

            let timeout = if dirty {
                Duration::ZERO
            } else if resizes.is_pending() || file_watcher.is_some() {
                BUSY_POLL
            } else {
                IDLE_POLL
            };
            let mut wait = timeout;
            let mut handled = 0_u32;
            // Key repeat bursts are drained before a single redraw.
            while event::poll(wait)? {
                wait = Duration::ZERO;
                let ev = event::read()?;
                if let Some(msg) = Self::handle_event(&ev, model, millis_since(start), &mut resizes)
                {
                    Self::dispatch(model, &mut file_watcher, msg);
                    handled += 1;
                }
            }
            if handled > 0 {
                tracing::trace!(handled, "events handled");
                dirty = true;
            }

            if dirty && !model.should_quit {
                let _draw_scope = crate::logging::scope("frame.draw");
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }
}
