use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::models::{AnalysisConfig, ParsedSession};
use crate::parsers::parse_transcript_with;
use crate::utils::read_transcript;

/// Find markdown transcripts under a directory, in stable path order.
pub fn discover_transcripts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("md") | Some("markdown")
            )
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Parse every transcript under `dir` into a session corpus.
///
/// Parses run in parallel; each parse is a pure function of its file, so no
/// coordination is needed. Unreadable files are logged and skipped, but a
/// failure rate above 50% fails the whole build.
pub fn build_corpus(dir: &Path, config: &AnalysisConfig) -> Result<Vec<ParsedSession>> {
    let paths = discover_transcripts(dir)?;
    if paths.is_empty() {
        warn!(dir = %dir.display(), "no transcripts found");
        return Ok(Vec::new());
    }

    let parsed: Vec<Option<ParsedSession>> = paths
        .par_iter()
        .map(|path| match read_transcript(path) {
            Ok(body) => {
                let source_id = path.to_string_lossy();
                Some(parse_transcript_with(&source_id, &body, config))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable transcript");
                None
            }
        })
        .collect();

    let total = parsed.len();
    let sessions: Vec<ParsedSession> = parsed.into_iter().flatten().collect();
    let failed = total - sessions.len();

    if failed * 2 > total {
        anyhow::bail!(
            "Corpus building failed: {}/{} transcripts could not be read",
            failed,
            total
        );
    }

    debug!(sessions = sessions.len(), failed, "corpus built");
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_transcript(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_discover_finds_markdown_only() {
        let dir = TempDir::new().unwrap();
        write_transcript(dir.path(), "session-app-abc123.md", "### 1. User (09:00)\nhi\n");
        write_transcript(dir.path(), "notes.txt", "not a transcript");
        write_transcript(dir.path(), "older.markdown", "### 1. User (09:00)\nhi\n");

        let paths = discover_transcripts(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_discover_recurses_subdirectories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2026").join("08");
        fs::create_dir_all(&nested).unwrap();
        write_transcript(&nested, "session-deep-abc123.md", "hello");

        let paths = discover_transcripts(dir.path()).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_build_corpus_parses_all_transcripts() {
        let dir = TempDir::new().unwrap();
        write_transcript(
            dir.path(),
            "session-alpha-abc123.md",
            "### 1. User (09:00)\nfix the build\n### 2. Assistant (09:01)\ndone\n",
        );
        write_transcript(
            dir.path(),
            "session-beta-def456.md",
            "### 1. User (10:00)\nhello\n",
        );

        let corpus = build_corpus(dir.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(corpus.len(), 2);
        let mut projects: Vec<&str> =
            corpus.iter().map(|s| s.project_name.as_str()).collect();
        projects.sort();
        assert_eq!(projects, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_build_corpus_empty_directory() {
        let dir = TempDir::new().unwrap();
        let corpus = build_corpus(dir.path(), &AnalysisConfig::default()).unwrap();
        assert!(corpus.is_empty());
    }
}
