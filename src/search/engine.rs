//! Filter, score, sort, paginate.
//!
//! The pipeline order is a contract: validate options, apply structured
//! filters, score (keyword search doubles as a filter), stable-sort by score,
//! then paginate. Callers may rely on equal-score results keeping their
//! filter-stage relative order.

use crate::models::{
    AnalysisConfig, ParsedSession, SearchOptions, SearchResult, Speaker, UNKNOWN_PROJECT,
};
use crate::search::SearchOptionsError;
use crate::utils::floor_char_boundary;

const DEFAULT_LIMIT: usize = 10;

/// Budget for the match-context excerpt, ellipses included.
const CONTEXT_BUDGET: usize = 150;
/// How far before the first keyword hit the excerpt starts.
const CONTEXT_LEAD: usize = 50;
const ELLIPSIS: &str = "...";

/// Score weights: user turns count double, project and struggle hits are
/// flat bonuses.
const USER_TURN_WEIGHT: usize = 2;
const PROJECT_MATCH_BONUS: f64 = 3.0;
const STRUGGLE_MATCH_BONUS: f64 = 2.0;

/// Search a session collection with default analysis thresholds.
pub fn search(
    sessions: &[ParsedSession],
    options: &SearchOptions,
) -> Result<Vec<SearchResult>, SearchOptionsError> {
    search_with(sessions, options, &AnalysisConfig::default())
}

/// Search a session collection, validating options eagerly.
///
/// Validation fails closed: bad options mean no filtering happens at all.
/// Everything after validation is infallible; an empty collection or a query
/// nothing matches returns an empty vector, never an error.
pub fn search_with(
    sessions: &[ParsedSession],
    options: &SearchOptions,
    config: &AnalysisConfig,
) -> Result<Vec<SearchResult>, SearchOptionsError> {
    validate(options)?;

    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    // A present-but-blank keyword applies no scoring constraint.
    let keyword = options
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<SearchResult> = sessions
        .iter()
        .filter(|session| passes_filters(session, options, config))
        .filter_map(|session| score_session(session, keyword.as_deref(), config))
        .collect();

    // Stable: equal scores keep filter-stage order.
    results.sort_by(|a, b| {
        b.relevance_score.partial_cmp(&a.relevance_score).unwrap_or(std::cmp::Ordering::Equal)
    });

    let offset = options.offset.unwrap_or(0);
    let limit = options.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(results.into_iter().skip(offset).take(limit).collect())
}

fn validate(options: &SearchOptions) -> Result<(), SearchOptionsError> {
    if options.limit == Some(0) {
        return Err(SearchOptionsError::InvalidLimit);
    }
    if let (Some(min), Some(max)) = (options.min_duration, options.max_duration)
        && min > max
    {
        return Err(SearchOptionsError::InvalidDurationRange { min, max });
    }
    Ok(())
}

fn passes_filters(
    session: &ParsedSession,
    options: &SearchOptions,
    config: &AnalysisConfig,
) -> bool {
    if let Some(project) = &options.project
        && !session.project_name.to_lowercase().contains(&project.to_lowercase())
    {
        return false;
    }
    if let Some(min) = options.min_duration
        && session.duration_seconds < min
    {
        return false;
    }
    if let Some(max) = options.max_duration
        && session.duration_seconds > max
    {
        return false;
    }
    if let Some(wanted) = options.has_struggle
        && session.has_struggle(config) != wanted
    {
        return false;
    }
    if let Some(pattern) = &options.struggle_pattern
        && !session.struggle_indicators(config).iter().any(|i| i == pattern)
    {
        return false;
    }
    true
}

/// Build the result for one surviving session. `None` means the keyword
/// scored zero and the session is dropped.
fn score_session(
    session: &ParsedSession,
    keyword: Option<&str>,
    config: &AnalysisConfig,
) -> Option<SearchResult> {
    let indicators = session.struggle_indicators(config);

    let (score, context) = match keyword {
        None => (1.0, String::new()),
        Some(kw) => {
            let (score, context) = keyword_score(session, &indicators, kw);
            if score <= 0.0 {
                return None;
            }
            (score, context)
        }
    };

    Some(SearchResult {
        session_id: session.session_id.clone(),
        project_name: session.project_name.clone(),
        duration_seconds: session.duration_seconds,
        has_struggle: !indicators.is_empty(),
        struggle_indicators: indicators,
        relevance_score: score,
        match_context: context,
        summary: summarize(session, config),
    })
}

fn keyword_score(session: &ParsedSession, indicators: &[String], keyword: &str) -> (f64, String) {
    let mut score = 0.0;
    let mut context = String::new();

    for entry in &session.conversation {
        let lower = entry.content.to_lowercase();
        let occurrences = lower.matches(keyword).count();
        if occurrences == 0 {
            continue;
        }
        let weight = if entry.speaker == Speaker::User { USER_TURN_WEIGHT } else { 1 };
        score += (occurrences * weight) as f64;

        if context.is_empty()
            && let Some(position) = lower.find(keyword)
        {
            context = excerpt(&entry.content, position);
        }
    }

    if session.project_name.to_lowercase().contains(keyword) {
        score += PROJECT_MATCH_BONUS;
        if context.is_empty() {
            context = format!("Project: {}", session.project_name);
        }
    }

    for indicator in indicators {
        if indicator.to_lowercase().contains(keyword) {
            score += STRUGGLE_MATCH_BONUS;
            if context.is_empty() {
                context = format!("Struggle pattern: {}", indicator);
            }
        }
    }

    (score, context)
}

/// Excerpt around the first occurrence: starts `CONTEXT_LEAD` before the hit
/// and spends at most `CONTEXT_BUDGET` characters, ellipses included.
fn excerpt(content: &str, position: usize) -> String {
    let truncated_front = position > CONTEXT_LEAD;
    let start = floor_char_boundary(content, position.saturating_sub(CONTEXT_LEAD));

    let mut budget = CONTEXT_BUDGET;
    if truncated_front {
        budget -= ELLIPSIS.len();
    }

    let remaining = &content[start..];
    let truncated_back = remaining.len() > budget;
    if truncated_back {
        budget -= ELLIPSIS.len();
    }

    let end = floor_char_boundary(remaining, budget.min(remaining.len()));
    let mut out = String::new();
    if truncated_front {
        out.push_str(ELLIPSIS);
    }
    out.push_str(remaining[..end].trim());
    if truncated_back {
        out.push_str(ELLIPSIS);
    }
    out
}

/// One-line session summary: rounded minutes, project (when known), tool and
/// message counts (when non-zero), and a struggle marker. Absent fields are
/// omitted, never placeholders.
fn summarize(session: &ParsedSession, config: &AnalysisConfig) -> String {
    let minutes = (session.duration_seconds + 30) / 60;
    let mut parts = vec![format!("{}m", minutes)];

    if session.project_name != UNKNOWN_PROJECT {
        parts.push(session.project_name.clone());
    }
    if session.metadata.tool_count > 0 {
        parts.push(format!("{} tools", session.metadata.tool_count));
    }
    if !session.conversation.is_empty() {
        parts.push(format!("{} messages", session.conversation.len()));
    }
    if session.has_struggle(config) {
        parts.push("Had struggles".to_string());
    }

    parts.join(", ")
}
