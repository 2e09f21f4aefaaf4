//! Heuristic error classification for extracted text windows.
//!
//! Transcripts constantly *talk about* errors without reporting one ("add
//! error handling", "fixed the error"), so classification is exclusion-first:
//! any exclusion phrase forces a non-error verdict before the inclusion
//! patterns are consulted at all. Only then do explicit failure markers count.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that mention errors without reporting one. Any hit wins.
static EXCLUSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)no errors?",
        r"(?i)without errors?",
        r"(?i)fix(?:ed|ing)?[^.\n]{0,40}?errors?",
        r"(?i)error handling",
        r"(?i)error message for",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid exclusion pattern"))
    .collect()
});

/// Explicit failure markers. First hit decides; tried only after exclusions.
static INCLUSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"❌",
        r"✗",
        r"(?i)\bfailed\b",
        r"(?i)\bfailure\b",
        r"(?i)error:",
        r"(?i)string to replace not found",
        r"(?i)file not found",
        r"(?i)permission denied",
        r"(?i)command not found",
        r"(?i)syntax error",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid inclusion pattern"))
    .collect()
});

static ERROR_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:error|failed|problem)").expect("valid error-word pattern"));

/// Occurrence threshold above which a whole body is flagged as error-prone.
const BODY_ERROR_WORD_THRESHOLD: usize = 5;

/// Classify a context window as reporting an error.
///
/// Exclusion patterns are checked first and short-circuit to `false`; this
/// ordering is the contract, not an optimization.
pub fn is_error_context(window: &str) -> bool {
    if EXCLUSION_PATTERNS.iter().any(|p| p.is_match(window)) {
        return false;
    }
    INCLUSION_PATTERNS.iter().any(|p| p.is_match(window))
}

/// Coarse session-level error signal: more than five occurrences of
/// error/failed/problem across the whole body.
///
/// Independent of [`is_error_context`]; used only for the aggregate
/// `metadata.has_errors` flag, never for per-operation status.
pub fn body_has_errors(body: &str) -> bool {
    ERROR_WORDS.find_iter(body).count() > BODY_ERROR_WORD_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_not_error() {
        assert!(!is_error_context("The file was written successfully."));
        assert!(!is_error_context(""));
    }

    #[test]
    fn test_explicit_failure_markers() {
        assert!(is_error_context("The command failed with exit code 1"));
        assert!(is_error_context("error: cannot find symbol"));
        assert!(is_error_context("❌ Tests did not pass"));
        assert!(is_error_context("✗ lint"));
    }

    #[test]
    fn test_tool_specific_failure_phrases() {
        assert!(is_error_context("String to replace not found in file"));
        assert!(is_error_context("bash: foo: command not found"));
        assert!(is_error_context("Permission denied (os error 13)"));
        assert!(is_error_context("cat: notes.txt: file not found"));
        assert!(is_error_context("syntax error near unexpected token"));
    }

    #[test]
    fn test_exclusions_force_non_error() {
        assert!(!is_error_context("Completed with no errors"));
        assert!(!is_error_context("The build finished without error"));
        assert!(!is_error_context("Fixed the error in the parser"));
        assert!(!is_error_context("We should improve error handling here"));
        assert!(!is_error_context("Add an error message for missing files"));
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        // "failed" alone is an error, but the exclusion phrase vetoes it.
        assert!(is_error_context("the test failed"));
        assert!(!is_error_context("the test failed before we added error handling"));
    }

    #[test]
    fn test_discussion_of_errors_is_not_error() {
        assert!(!is_error_context("Let's fix that error next"));
        // No exclusion phrase present, explicit marker wins.
        assert!(is_error_context("Build failed again"));
    }

    #[test]
    fn test_body_has_errors_threshold() {
        assert!(!body_has_errors("one error, two errors"));
        let five = "error failed problem error failed";
        assert!(!body_has_errors(five));
        let six = "error failed problem error failed problem";
        assert!(body_has_errors(six));
    }

    #[test]
    fn test_body_has_errors_is_case_insensitive() {
        assert!(body_has_errors("ERROR Error error FAILED Failed Problem"));
    }
}
