use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Maximum transcript size accepted by the reader: 10MB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Read a transcript file after validating its size.
///
/// Oversized files are rejected up front rather than partially read; a
/// transcript over the cap is almost certainly not a session transcript.
pub fn read_transcript(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to stat transcript: {}", path.display()))?;
    if metadata.len() > MAX_FILE_SIZE_BYTES {
        bail!(
            "Transcript too large: {} is {} bytes (max {})",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE_BYTES
        );
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))
}
