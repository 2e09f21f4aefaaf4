//! Tool invocation extraction from transcript bodies.
//!
//! Four independent marker families contribute candidates to one list; each
//! family is a matcher function applied uniformly, so adding a family is a
//! one-line extension of [`MARKER_FAMILIES`]. Candidates are merged in order
//! of appearance, and each one is classified as success or error by running
//! the struggle classifier over a fixed-radius window around the match.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ToolOperation, ToolStatus};
use crate::parsers::struggle::is_error_context;
use crate::parsers::transcript::{TURN_HEADER, is_assistant_header};
use crate::utils::floor_char_boundary;

/// Radius of the classification window around a marker match, in bytes.
const CONTEXT_RADIUS: usize = 200;

/// How many lines after an Assistant header are checked for a bare tool name.
const BUILTIN_LOOKAHEAD_LINES: usize = 5;

/// Built-in tool identifiers recognized by the structural marker family.
const KNOWN_TOOLS: &[&str] = &[
    "read_file",
    "write_file",
    "edit_file",
    "bash",
    "grep",
    "glob",
    "list_directory",
    "run_command",
    "web_search",
];

static TOOL_USED_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Tool Used:\*\*\s*`([^`\n]+)`").expect("valid banner pattern"));

static INVOKE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<invoke\s+name="([^"]+)""#).expect("valid invoke pattern"));

static USING_TOOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Using tool:\s*([A-Za-z0-9_-]+)").expect("valid using pattern"));

static PARAMETER_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<parameter\s+name="[^"]*">\s*(.*?)\s*</parameter>"#)
        .expect("valid parameter pattern")
});

static BACKTICK_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Input:\s*`([^`\n]+)`").expect("valid input pattern"));

static BOLD_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Input:\*\*\s*(\S[^\n]*)").expect("valid input pattern"));

static BOLD_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Output:\*\*\s*(\S[^\n]*)").expect("valid output pattern"));

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[A-Za-z0-9_]*\n(.*?)```").expect("valid fence pattern"));

static FREE_OUTPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Output|Result):\s*(\S[^\n]*)").expect("valid output pattern")
});

/// A marker family: scans the whole body, returns `(byte_offset, tool_name)`
/// candidates in order of appearance.
type MarkerMatcher = fn(&str) -> Vec<(usize, String)>;

static MARKER_FAMILIES: &[MarkerMatcher] =
    &[match_tool_used_banner, match_invoke_tag, match_using_tool, match_builtin_after_assistant];

/// Extract tool operations from a transcript body.
///
/// All marker families are evaluated; every match contributes one operation,
/// ordered by position in the body. When no family matches at all, a
/// best-effort fallback synthesizes one `"conversation"` operation per turn
/// header beyond the opening exchange, on the assumption that the session did
/// work even if no tool markers survived into the transcript.
pub fn extract_tool_operations(body: &str) -> Vec<ToolOperation> {
    let mut candidates: Vec<(usize, String)> = Vec::new();
    for matcher in MARKER_FAMILIES {
        candidates.extend(matcher(body));
    }
    candidates.sort_by_key(|(offset, _)| *offset);

    if candidates.is_empty() {
        return fallback_conversation_operations(body);
    }

    candidates
        .into_iter()
        .map(|(offset, name)| {
            let window = context_window(body, offset, CONTEXT_RADIUS);
            let status =
                if is_error_context(window) { ToolStatus::Error } else { ToolStatus::Success };
            let (input, output) = extract_payloads(window);
            ToolOperation { name, status, input, output }
        })
        .collect()
}

fn match_tool_used_banner(body: &str) -> Vec<(usize, String)> {
    TOOL_USED_BANNER
        .captures_iter(body)
        .map(|caps| {
            let m = caps.get(0).expect("match 0 always present");
            (m.start(), caps[1].trim().to_string())
        })
        .collect()
}

fn match_invoke_tag(body: &str) -> Vec<(usize, String)> {
    INVOKE_TAG
        .captures_iter(body)
        .map(|caps| {
            let m = caps.get(0).expect("match 0 always present");
            (m.start(), caps[1].trim().to_string())
        })
        .collect()
}

fn match_using_tool(body: &str) -> Vec<(usize, String)> {
    USING_TOOL
        .captures_iter(body)
        .map(|caps| {
            let m = caps.get(0).expect("match 0 always present");
            (m.start(), caps[1].to_string())
        })
        .collect()
}

/// Structural family: a known built-in tool identifier on its own line (bare
/// or backticked) within the first few lines after an Assistant turn header.
fn match_builtin_after_assistant(body: &str) -> Vec<(usize, String)> {
    let mut candidates = Vec::new();

    for header in TURN_HEADER.find_iter(body) {
        if !is_assistant_header(header.as_str()) {
            continue;
        }
        let mut offset = header.end();
        for line in body[header.end()..].lines().take(BUILTIN_LOOKAHEAD_LINES) {
            // Stop at the next turn header; its lines belong to another turn.
            if TURN_HEADER.is_match(line) {
                break;
            }
            let name = line.trim().trim_matches('`');
            if KNOWN_TOOLS.contains(&name) {
                candidates.push((offset, name.to_string()));
            }
            offset += line.len() + 1;
        }
    }

    candidates
}

/// One synthesized operation per turn header beyond the opening exchange.
fn fallback_conversation_operations(body: &str) -> Vec<ToolOperation> {
    let header_count = TURN_HEADER.find_iter(body).count();
    let synthesized = header_count.saturating_sub(2);
    (0..synthesized)
        .map(|_| ToolOperation {
            name: "conversation".to_string(),
            status: ToolStatus::Success,
            input: None,
            output: None,
        })
        .collect()
}

/// Capture the input and output payloads visible in one window.
///
/// Explicit markers win their side outright. Fenced code blocks then fill
/// whichever sides are still empty: two bare fences read as an input/output
/// pair, a lone bare fence is the tool's output, and a fence next to one
/// explicit marker fills the other side. Free-text `Output:`/`Result:` lines
/// are the last resort for output.
fn extract_payloads(window: &str) -> (Option<String>, Option<String>) {
    let mut input = capture_first(window, &[&PARAMETER_TAG, &BACKTICK_INPUT, &BOLD_INPUT]);
    let mut output = capture_first(window, &[&BOLD_OUTPUT]);

    let mut fences = FENCED_BLOCK
        .captures_iter(window)
        .map(|caps| caps[1].trim().to_string())
        .filter(|text| !text.is_empty());
    match (input.is_some(), output.is_some()) {
        (false, false) => match (fences.next(), fences.next()) {
            (Some(first), Some(second)) => {
                input = Some(first);
                output = Some(second);
            }
            (Some(only), None) => output = Some(only),
            _ => {}
        },
        (false, true) => input = fences.next(),
        (true, false) => output = fences.next(),
        (true, true) => {}
    }

    if output.is_none() {
        output = capture_first(window, &[&FREE_OUTPUT]);
    }
    (input, output)
}

fn capture_first(window: &str, patterns: &[&Lazy<Regex>]) -> Option<String> {
    patterns
        .iter()
        .filter_map(|p| p.captures(window))
        .map(|caps| caps[1].trim().to_string())
        .find(|text| !text.is_empty())
}

/// Slice a window of `radius` bytes either side of `center`, clamped to char
/// boundaries so multi-byte content never panics.
fn context_window(body: &str, center: usize, radius: usize) -> &str {
    let start = floor_char_boundary(body, center.saturating_sub(radius));
    let end = floor_char_boundary(body, (center + radius).min(body.len()));
    &body[start..end]
}
