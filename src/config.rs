//! Flag files holding default command-line options.
//!
//! A global file and a local `.vjrc` contain the same flags the CLI
//! accepts, one or more per line, with `#` comments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    NoColor,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::NoColor => "no-color",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub perf: bool,
    pub theme: Option<ThemeMode>,
    pub margin: Option<usize>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; booleans accumulate, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            perf: self.perf || other.perf,
            theme: other.theme.or(self.theme),
            margin: other.margin.or(self.margin),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Command-line form of the flags that differ from the defaults.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.watch {
            args.push("--watch".to_string());
        }
        if let Some(theme) = self.theme {
            args.push(format!("--theme {}", theme.as_str()));
        }
        if let Some(margin) = self.margin {
            args.push(format!("--margin {margin}"));
        }
        if self.perf {
            args.push("--perf".to_string());
        }
        if let Some(path) = &self.debug_log {
            args.push(format!("--debug-log {}", path.display()));
        }
        args
    }
}

/// Per-user flag file, falling back to the local override when no
/// config directory can be found.
pub fn global_config_path() -> PathBuf {
    user_config_dir().map_or_else(local_override_path, |dir| dir.join("vj").join("config"))
}

fn user_config_dir() -> Option<PathBuf> {
    let env_dir = |name: &str| std::env::var_os(name).map(PathBuf::from);
    if cfg!(target_os = "windows") {
        env_dir("APPDATA")
    } else if cfg!(target_os = "macos") {
        env_dir("HOME").map(|home| home.join("Library/Application Support"))
    } else {
        env_dir("XDG_CONFIG_HOME").or_else(|| env_dir("HOME").map(|home| home.join(".config")))
    }
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".vjrc")
}

/// Read a flag file. A missing file yields the defaults.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigFlags::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };
    let flags = parse_flag_tokens(&config_tokens(&content));
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

fn config_tokens(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(before, _)| before))
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect()
}

/// Write `flags` so that [`load_config_flags`] reads them back.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut out = String::from("# vj defaults (saved with --save)\n");
    for arg in flags.to_args() {
        out.push_str(&arg);
        out.push('\n');
    }
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
    }
    fs::write(path, out).with_context(|| format!("Failed to write config {}", path.display()))
}

/// Delete the flag file if there is one.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Pick the flags this module knows out of raw arguments.
///
/// Unknown tokens (the file name, `--save`) are skipped, so the raw
/// process arguments can be passed directly.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" | "-w" => flags.watch = true,
            "--perf" => flags.perf = true,
            "--theme" | "--margin" | "--debug-log" => {
                if let Some(next) = tokens.get(i + 1) {
                    apply_option(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    apply_option(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn apply_option(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--theme" => flags.theme = parse_theme(value),
        "--margin" => flags.margin = value.parse().ok(),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "dark" => Some(ThemeMode::Dark),
        "light" => Some(ThemeMode::Light),
        "no-color" => Some(ThemeMode::NoColor),
        _ => None,
    }
}
