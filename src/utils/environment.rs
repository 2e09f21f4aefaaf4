use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory searched for transcript files.
///
/// `TRANSCRIPTS_DIR` overrides; the default is `~/.claude/sessions`.
pub fn get_transcripts_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("TRANSCRIPTS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".claude").join("sessions"))
}
