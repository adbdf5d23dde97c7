//! Locating and parsing the backing history file.
//!
//! The file is a plain list of commands, one per line, oldest first. Bash may
//! interleave `#<epoch>` timestamp comments when `HISTTIMEFORMAT` is set, and
//! zsh's extended history prefixes each command with `: <epoch>:<elapsed>;`.
//! Both decorations are stripped so that only the command text remains.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, info};

use super::HistoryError;

/// File used when neither `--histfile` nor `$HISTFILE` is given.
const DEFAULT_HISTORY_FILE: &str = ".bash_history";

/// Resolve the history file path.
///
/// Precedence: explicit path, then `$HISTFILE`, then `$HOME/.bash_history`,
/// then the platform home directory. `env` is the environment lookup, passed
/// in so callers (and tests) control where variables come from.
pub fn resolve_history_path<F>(explicit: Option<&Path>, env: F) -> Result<PathBuf, HistoryError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(histfile) = env("HISTFILE").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(histfile));
    }

    let home = env("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .ok_or(HistoryError::Unresolved)?;

    Ok(home.join(DEFAULT_HISTORY_FILE))
}

/// Read and parse the history file at `path`, oldest command first.
pub fn read_history_file(path: &Path) -> Result<Vec<String>, HistoryError> {
    let bytes = fs::read(path).map_err(|source| HistoryError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = parse_history(&bytes);
    info!("Loaded {} history lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Split raw history bytes into commands.
///
/// Invalid UTF-8 is replaced rather than rejected; a history file with one
/// bad line is still a usable history.
pub fn parse_history(bytes: &[u8]) -> Vec<String> {
    let mut skipped = 0usize;
    let lines: Vec<String> = bytes
        .split(|b| *b == b'\n')
        .filter_map(|raw| {
            let decoded = String::from_utf8_lossy(raw);
            let line = decoded.strip_suffix('\r').unwrap_or(decoded.as_ref());
            if is_timestamp_comment(line) {
                skipped += 1;
                return None;
            }
            let command = strip_zsh_extended(line);
            if command.is_empty() {
                return None;
            }
            Some(command.to_string())
        })
        .collect();

    if skipped > 0 {
        debug!("Skipped {} timestamp lines", skipped);
    }
    lines
}

/// `#1700000000` lines written by bash alongside `HISTTIMEFORMAT`.
fn is_timestamp_comment(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// `: 1700000000:0;git status` becomes `git status`.
fn strip_zsh_extended(line: &str) -> &str {
    let Some(rest) = line.strip_prefix(": ") else {
        return line;
    };
    let Some((meta, command)) = rest.split_once(';') else {
        return line;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match meta.split_once(':') {
        Some((epoch, elapsed)) if all_digits(epoch) && all_digits(elapsed) => command,
        _ => line,
    }
}
