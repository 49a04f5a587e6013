//! Local session: an opaque signed-in marker with a display name.
//!
//! Stored as a small TOML file beside the config. Nothing in the core reads
//! it; it only personalizes CLI output and gates nothing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sprout_core::notify::Notifier;

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub signed_in: NaiveDate,
}

/// Return the path to the session file.
pub fn session_path() -> PathBuf {
    config::config_dir().join("session.toml")
}

/// Load the session, if one exists. A missing file means signed out.
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read session file at {}", path.display()));
        }
    };
    let session: Session = toml::from_str(&contents).context("failed to parse session file")?;
    Ok(Some(session))
}

/// Write the session file, creating parent dirs as needed.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(session).context("failed to serialize session")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write session file at {}", path.display()))?;
    Ok(())
}

/// Delete the session file. Returns whether a session existed.
pub fn clear_session(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e)
            .with_context(|| format!("failed to remove session file at {}", path.display())),
    }
}

// -----------------------------------------------------------------------
// Command handlers
// -----------------------------------------------------------------------

pub fn run_signin(name: &str, today: NaiveDate) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("display name must not be empty");
    }
    let session = Session {
        name: name.to_owned(),
        signed_in: today,
    };
    save_session(&session_path(), &session)?;
    println!("Signed in as {name}.");
    Ok(())
}

pub fn run_signout(notifier: &dyn Notifier) -> Result<()> {
    if clear_session(&session_path())? {
        notifier.info("signed out");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub fn run_whoami() -> Result<()> {
    match load_session(&session_path())? {
        Some(session) => println!("{} (since {})", session.name, session.signed_in),
        None => println!("Not signed in."),
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
