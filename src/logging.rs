//! Logging setup and lightweight timing scopes.
//!
//! Events go through `tracing`. By default only warnings reach stderr; a
//! debug log file captures everything the crate emits at `debug`, which is
//! the only way to see events while the alternate screen is up.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Target used for timing events.
pub const PERF_TARGET: &str = "vj::perf";

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);

/// Times a region and logs it on drop when perf logging is on.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_perf_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: PERF_TARGET, scope = self.name, elapsed_ms, "timing");
    }
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn set_perf_enabled(enabled: bool) {
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_perf_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

fn filter(debug: bool, perf: bool) -> Result<EnvFilter> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), debug, perf)
}

/// Warnings by default; a bare level in `rust_log` replaces that default.
fn filter_from(rust_log: Option<&str>, debug: bool, perf: bool) -> Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default());
    if debug {
        filter = filter.add_directive("vj=debug".parse()?);
    }
    if perf {
        filter = filter.add_directive(format!("{PERF_TARGET}=debug").parse()?);
    }
    Ok(filter)
}

/// Subscriber writing plain-text events to `path`.
///
/// # Errors
///
/// Fails if the file cannot be created.
pub fn file_subscriber(path: &Path, perf: bool) -> Result<impl Subscriber + Send + Sync> {
    let file = File::create(path)
        .with_context(|| format!("failed to create debug log {}", path.display()))?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter(true, perf)?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish())
}

/// Install the global subscriber.
///
/// With `debug_log` set, events at `debug` and above go to that file.
/// Otherwise warnings go to stderr. `RUST_LOG` adds directives either way.
///
/// # Errors
///
/// Fails if the log file cannot be created or a subscriber is already set.
pub fn init(debug_log: Option<&Path>, perf: bool) -> Result<()> {
    set_perf_enabled(perf);
    let installed = match debug_log {
        Some(path) => tracing::subscriber::set_global_default(file_subscriber(path, perf)?)
            .map_err(|err| anyhow!("failed to install logger: {err}")),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter(false, perf)?)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("failed to install logger: {err}")),
    };
    installed?;
    tracing::debug!(perf, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_perf_enabled_toggles_runtime_flag() {
        set_perf_enabled(true);
        assert!(is_perf_enabled());

        set_perf_enabled(false);
        assert!(!is_perf_enabled());
    }

    #[test]
    fn test_filter_defaults_to_warn() {
        let filter = filter_from(None, false, false).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_level_overrides_default() {
        let filter = filter_from(Some("debug"), false, false).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        let filter = filter_from(Some("error"), false, false).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_debug_log_enables_crate_events() {
        let filter = filter_from(None, true, false).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_file_subscriber_writes_debug_events() {
        let temp_file = NamedTempFile::new().unwrap();
        let subscriber = file_subscriber(temp_file.path(), false).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "vj::test", answer = 42, "hello log");
        });

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("hello log"));
        assert!(content.contains("answer=42"));
    }

    #[test]
    fn test_file_subscriber_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("vj.log");
        assert!(file_subscriber(&path, false).is_err());
    }
}
