use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Club;
use crate::roster::initial_clubs;

const DATA_DIR: &str = "comparador";
const DATA_FILE: &str = "clubs.json";

/// Snapshot location: `$XDG_DATA_HOME/comparador/clubs.json`, else
/// `~/.local/share/comparador/clubs.json`.
pub fn default_data_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(DATA_DIR).join(DATA_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR)
            .join(DATA_FILE),
    )
}

/// `Ok(None)` when no snapshot has been written yet.
pub fn read_snapshot(path: &Path) -> Result<Option<Vec<Club>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("read snapshot {}", path.display()));
        }
    };
    let clubs = serde_json::from_str::<Vec<Club>>(&raw)
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    Ok(Some(clubs))
}

/// Stored clubs, or the seed roster when there is no snapshot yet. A snapshot
/// that exists but cannot be read is an error.
pub fn load_clubs(path: Option<&Path>) -> Result<Vec<Club>> {
    let Some(path) = path else {
        return Ok(initial_clubs());
    };
    Ok(read_snapshot(path)?.unwrap_or_else(initial_clubs))
}

/// Move an unreadable snapshot aside to `<file>.bak` so the next save does
/// not overwrite it.
pub fn back_up_snapshot(path: &Path) -> Result<PathBuf> {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    let backup = PathBuf::from(name);
    fs::rename(path, &backup)
        .with_context(|| format!("move {} to {}", path.display(), backup.display()))?;
    Ok(backup)
}

pub fn save_clubs(path: &Path, clubs: &[Club]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(clubs).context("serialize clubs")?;
    fs::write(&tmp, json).context("write clubs snapshot")?;
    fs::rename(&tmp, path).context("swap clubs snapshot")?;
    Ok(())
}

/// Drop the stored snapshot and start over from the seed roster.
pub fn reset_all_data(path: Option<&Path>) -> Result<Vec<Club>> {
    if let Some(path) = path {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("remove {}", path.display()));
            }
        }
    }
    Ok(initial_clubs())
}
