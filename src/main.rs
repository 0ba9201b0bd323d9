//! Piecemeal - a small terminal text editor built on a piece table.
//!
//! # Usage
//!
//! ```bash
//! piecemeal notes.txt
//! piecemeal --read-only /var/log/syslog
//! piecemeal --merge-window 500 --log edit.log notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use piecemeal::app::App;
use piecemeal::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use piecemeal::perf;

/// A small terminal text editor built on a piece table
#[derive(Parser, Debug)]
#[command(name = "piecemeal", version, about, long_about = None)]
struct Cli {
    /// File to edit; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Open without allowing edits or saves
    #[arg(long)]
    read_only: bool,

    /// Keystrokes closer together than this many milliseconds merge into one edit
    #[arg(long, value_name = "MS")]
    merge_window: Option<u64>,

    /// Write logs to this file (the terminal is in raw mode while editing)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Log flush and render timings
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Log to `path` when given. Without it nothing is logged, since stdout and
/// stderr belong to the editor screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    init_logging(effective.log.as_deref())?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, "effective flags");

    let mut app = App::new(cli.file).with_read_only(effective.read_only);
    if let Some(ms) = effective.merge_window {
        app = app.with_merge_window(Duration::from_millis(ms));
    }

    app.run().context("Application error")
}
