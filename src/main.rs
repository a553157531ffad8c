//! vj - a terminal JSON viewer with folding, search and path jumps.
//!
//! # Usage
//!
//! ```bash
//! vj data.json
//! vj --watch data.json
//! curl -s https://example.com/api | vj
//! ```

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use vj::app::App;
use vj::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use vj::document::Document;
use vj::ui::viewport::DEFAULT_MARGIN;

/// A terminal JSON viewer
#[derive(Parser, Debug)]
#[command(name = "vj", version, about, long_about = None)]
struct Cli {
    /// JSON file to view; stdin is read when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Watch file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Rows kept between the cursor and the window edge
    #[arg(long, value_name = "N")]
    margin: Option<usize>,

    /// Log timing of projection, search and drawing
    #[arg(long)]
    perf: bool,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            watch: self.watch,
            perf: self.perf,
            theme: self.theme,
            margin: self.margin,
            debug_log: self.debug_log.clone(),
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<Document> {
    let _scope = vj::logging::scope("main.read_input");
    let bytes = match file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };
    let source = file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    Document::from_json_bytes(&bytes).with_context(|| format!("Failed to load {source}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let debug_log = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("VJ_DEBUG_LOG").map(PathBuf::from));
    vj::logging::init(debug_log.as_deref(), effective.perf)?;
    tracing::debug!(?effective, "effective flags");

    if cli.file.is_none() && std::io::stdin().is_terminal() {
        Cli::command().print_help()?;
        anyhow::bail!("no input: pass a FILE or pipe JSON on stdin");
    }
    let document = read_input(cli.file.as_ref())?;

    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_theme(effective.theme.unwrap_or_default())
        .with_margin(effective.margin.unwrap_or(DEFAULT_MARGIN))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run(document).context("Application error")
}
