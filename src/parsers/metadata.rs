//! Session identity and duration extraction.
//!
//! Both extractors run ordered pattern lists and take the first match. For
//! durations this ordering is a deliberate tie-break: explicit second-labelled
//! values beat minute-labelled ones even when the minute text appears earlier
//! in the body. A miss is never an error; the documented fallbacks apply.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{UNKNOWN_PROJECT, UNKNOWN_SESSION_ID};

/// Identity patterns over the identifier stem, tried in order. Each must
/// capture `project` then `id`.
static IDENTITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Leading session marker, trailing hex id: session-my-project-a1b2c3d4
        r"^session[-_](?P<project>.+?)[-_](?P<id>[0-9a-fA-F]{6,})$",
        // No marker; require a longer trailing id to avoid eating real words.
        r"^(?P<project>.+?)[-_](?P<id>[0-9a-fA-F]{8,})$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid identity pattern"))
    .collect()
});

/// Duration patterns with their multiplier to seconds, tried in order.
static DURATION_PATTERNS: Lazy<Vec<(Regex, u64)>> = Lazy::new(|| {
    [
        (r"(?i)(\d+)\s*sec(?:ond)?s?\b", 1),
        (r"(?i)(\d+)\s*min(?:ute)?s?\b", 60),
        (r"(?i)session length:?\s*(\d+)", 60),
        (r"(?i)total time:?\s*(\d+)", 60),
        (r"(?i)runtime:?\s*(\d+)", 60),
    ]
    .iter()
    .map(|(p, mul)| (Regex::new(p).expect("valid duration pattern"), *mul))
    .collect()
});

/// Derive `(session_id, project_name)` from a transcript source identifier.
///
/// The identifier is typically a file name like
/// `session-billing-api-f3a9c21b.md`; any directory prefix and `.md`/`.markdown`
/// extension are ignored. Hyphens and underscores in the project segment
/// become spaces. On no match both fallbacks apply: `"unknown"` /
/// `"Unknown Project"`.
pub fn extract_session_identity(source_id: &str) -> (String, String) {
    let stem = identifier_stem(source_id);

    for pattern in IDENTITY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(stem) {
            let project = caps["project"].replace(['-', '_'], " ");
            let id = caps["id"].to_string();
            return (id, project);
        }
    }

    (UNKNOWN_SESSION_ID.to_string(), UNKNOWN_PROJECT.to_string())
}

/// Extract the session duration in seconds from the transcript body.
///
/// The first pattern in the priority table that matches anywhere in the body
/// wins; minute-labelled captures are multiplied by 60. No match yields 0.
pub fn extract_duration_seconds(body: &str) -> u64 {
    for (pattern, multiplier) in DURATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(body)
            && let Ok(value) = caps[1].parse::<u64>()
        {
            return value.saturating_mul(*multiplier);
        }
    }
    0
}

/// Strip any directory prefix and markdown extension from an identifier.
fn identifier_stem(source_id: &str) -> &str {
    let name = source_id.rsplit(['/', '\\']).next().unwrap_or(source_id);
    name.strip_suffix(".md").or_else(|| name.strip_suffix(".markdown")).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_with_session_marker() {
        let (id, project) = extract_session_identity("session-billing-api-f3a9c21b.md");
        assert_eq!(id, "f3a9c21b");
        assert_eq!(project, "billing api");
    }

    #[test]
    fn test_identity_strips_directory_prefix() {
        let (id, project) = extract_session_identity("/var/transcripts/session-web-abc123.md");
        assert_eq!(id, "abc123");
        assert_eq!(project, "web");
    }

    #[test]
    fn test_identity_without_marker_needs_longer_id() {
        let (id, project) = extract_session_identity("billing-api-0123456789ab.md");
        assert_eq!(id, "0123456789ab");
        assert_eq!(project, "billing api");
    }

    #[test]
    fn test_identity_fallbacks_on_no_match() {
        let (id, project) = extract_session_identity("notes.md");
        assert_eq!(id, UNKNOWN_SESSION_ID);
        assert_eq!(project, UNKNOWN_PROJECT);
    }

    #[test]
    fn test_identity_underscores_become_spaces() {
        let (_, project) = extract_session_identity("session_data_pipeline_deadbeef.md");
        assert_eq!(project, "data pipeline");
    }

    #[test]
    fn test_duration_seconds_label() {
        assert_eq!(extract_duration_seconds("Duration: 95 seconds"), 95);
        assert_eq!(extract_duration_seconds("took 10 secs overall"), 10);
    }

    #[test]
    fn test_duration_minutes_label_multiplies() {
        assert_eq!(extract_duration_seconds("Duration: 12 minutes"), 720);
        assert_eq!(extract_duration_seconds("about 3 min"), 180);
    }

    #[test]
    fn test_duration_labelled_totals() {
        assert_eq!(extract_duration_seconds("Session length: 25"), 1500);
        assert_eq!(extract_duration_seconds("Total time: 7"), 420);
        assert_eq!(extract_duration_seconds("Runtime: 2"), 120);
    }

    #[test]
    fn test_duration_no_match_is_zero() {
        assert_eq!(extract_duration_seconds("no timing info here"), 0);
        assert_eq!(extract_duration_seconds(""), 0);
    }

    #[test]
    fn test_duration_pattern_priority_beats_text_order() {
        // Minutes text appears first in the body, but the seconds pattern is
        // earlier in the priority table and wins.
        let body = "Wrap-up after 5 minutes of review. Duration: 42 seconds.";
        assert_eq!(extract_duration_seconds(body), 42);
    }
}
