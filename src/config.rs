//! Persistent default flags.
//!
//! A config file holds CLI-style tokens, one or more per line, with `#`
//! comment lines. The global file is merged with a local `.piecemealrc`
//! and then with the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub read_only: bool,
    pub perf: bool,
    /// Keystroke merge window in milliseconds.
    pub merge_window: Option<u64>,
    pub log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches are or-ed; valued options from
    /// `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            read_only: self.read_only || other.read_only,
            perf: self.perf || other.perf,
            merge_window: other.merge_window.or(self.merge_window),
            log: other.log.clone().or_else(|| self.log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("piecemeal").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("piecemeal")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("piecemeal").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("piecemeal")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".piecemealrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# piecemeal defaults (saved with --save)".to_string()];
    if flags.read_only {
        lines.push("--read-only".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(ms) = flags.merge_window {
        lines.push(format!("--merge-window {ms}"));
    }
    if let Some(log) = &flags.log {
        lines.push(format!("--log {}", log.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens and malformed
/// values are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--read-only" => flags.read_only = true,
            "--perf" => flags.perf = true,
            "--merge-window" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.merge_window = next.parse().ok();
                    i += 1;
                }
            }
            "--log" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.log = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--merge-window=") {
                    flags.merge_window = value.parse().ok();
                } else if let Some(value) = token.strip_prefix("--log=") {
                    flags.log = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}
