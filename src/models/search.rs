use serde::{Deserialize, Serialize};

/// Structured predicates and pagination for one search call.
///
/// Every field is optional; absent fields apply no constraint. Filters compose
/// with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Relevance keyword; sessions scoring zero for it are dropped.
    pub keyword: Option<String>,
    /// Case-insensitive substring match against the project name.
    pub project: Option<String>,
    /// Inclusive lower bound on session duration, seconds.
    pub min_duration: Option<u64>,
    /// Inclusive upper bound on session duration, seconds.
    pub max_duration: Option<u64>,
    /// Exact match against the session's struggle flag.
    pub has_struggle: Option<bool>,
    /// Membership test against the session's struggle-indicator set.
    pub struggle_pattern: Option<String>,
    /// Page size; defaults to 10. Zero is rejected at validation.
    pub limit: Option<usize>,
    /// Results skipped before the page; defaults to 0.
    pub offset: Option<usize>,
}

/// Ephemeral projection of one session for one query. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub session_id: String,
    pub project_name: String,
    pub duration_seconds: u64,
    pub has_struggle: bool,
    pub struggle_indicators: Vec<String>,
    pub relevance_score: f64,
    /// Excerpt around the first keyword hit, at most 150 characters.
    pub match_context: String,
    pub summary: String,
}
