//! Transcript line scanner and session assembler.
//!
//! A single left-to-right pass over the lines of a markdown transcript,
//! driven by a small explicit state machine. At most one conversation entry
//! is open at a time; flush logic lives in one place on the assembler.
//!
//! # Error Handling Strategy
//!
//! Transcripts are inherently noisy, so nothing in here raises. Unrecognized
//! lines degrade into embedded content of the open entry (or are dropped when
//! no entry is open), and even empty or garbled input assembles into a
//! best-effort [`ParsedSession`]. The only way to observe "failure" is a
//! session full of fallback values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    AnalysisConfig, ConversationEntry, EntryKind, ParsedSession, SessionMetadata, Speaker,
};
use crate::parsers::metadata::{extract_duration_seconds, extract_session_identity};
use crate::parsers::struggle::body_has_errors;
use crate::parsers::tools::extract_tool_operations;

/// Turn header: ordinal, period, speaker, parenthesized time label.
pub(crate) static TURN_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^### (\d+)\. (User|Assistant) \((.+)\)\s*$").expect("valid header pattern")
});

/// Speaker test against the header's capture group, not a substring: a time
/// label that mentions "Assistant" must not flip a User turn.
pub(crate) fn is_assistant_header(header_line: &str) -> bool {
    TURN_HEADER.captures(header_line).is_some_and(|caps| &caps[2] == "Assistant")
}

/// Second-level header that opens the conversation section.
const CONVERSATION_HEADER: &str = "Conversation";

/// Second-level headers that close the conversation. Membership is an exact
/// match against this set, never a prefix test: content that merely starts
/// with one of these words must stay embedded.
const TERMINAL_SECTIONS: &[&str] = &[
    "Tool Operations Summary",
    "Session Analysis",
    "Struggles Detected",
    "Recommendations",
    "Summary",
    "Session Summary",
];

const INPUT_MARKER: &str = "**Input:**";
const OUTPUT_MARKER: &str = "**Output:**";
const TOOL_USED_PREFIX: &str = "**Tool Used:**";
const TOOL_RESULT_PREFIX: &str = "**Tool Result";
const THINKING_MARKER: &str = "**Thinking:**";

static LIST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:[-*]|\d+\.)\s+(.*)$").expect("valid list pattern"));

static BACKTICK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("valid name pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    Preamble,
    InConversation,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadLabel {
    Input,
    Output,
}

impl PayloadLabel {
    fn tag(self) -> &'static str {
        match self {
            Self::Input => "Input:",
            Self::Output => "Output:",
        }
    }
}

/// The one entry currently being accumulated.
#[derive(Debug)]
struct OpenEntry {
    index: usize,
    speaker: Speaker,
    timestamp: String,
    kind: EntryKind,
    content: Vec<String>,
    /// Open payload region, if an `**Input:**`/`**Output:**` marker is active.
    payload: Option<(PayloadLabel, Vec<String>)>,
    in_fence: bool,
}

#[derive(Debug, Default)]
struct Assembler {
    entries: Vec<ConversationEntry>,
    open: Option<OpenEntry>,
}

impl Assembler {
    fn open_entry(&mut self, index: usize, speaker: Speaker, timestamp: String) {
        self.flush();
        self.open = Some(OpenEntry {
            index,
            speaker,
            timestamp,
            kind: EntryKind::Message,
            content: Vec::new(),
            payload: None,
            in_fence: false,
        });
    }

    /// Close the open entry, payload buffer first, then the entry itself.
    fn flush(&mut self) {
        let Some(mut entry) = self.open.take() else {
            return;
        };
        flush_payload(&mut entry);
        let content = entry.content.join("\n").trim().to_string();
        self.entries.push(ConversationEntry {
            index: entry.index,
            speaker: entry.speaker,
            timestamp: entry.timestamp,
            content,
            kind: entry.kind,
        });
    }
}

fn flush_payload(entry: &mut OpenEntry) {
    let Some((label, lines)) = entry.payload.take() else {
        return;
    };
    let body = lines.join("\n").trim().to_string();
    if !body.is_empty() {
        entry.content.push(format!("{} {}", label.tag(), body));
    }
}

/// Parse one transcript into a [`ParsedSession`] using default thresholds.
pub fn parse_transcript(source_id: &str, body: &str) -> ParsedSession {
    parse_transcript_with(source_id, body, &AnalysisConfig::default())
}

/// Parse one transcript with explicit analysis thresholds.
///
/// Pure and total: the same input always yields the same session, and no
/// input raises. Parsing holds no state between invocations, so independent
/// transcripts may be parsed concurrently without coordination.
pub fn parse_transcript_with(
    source_id: &str,
    body: &str,
    config: &AnalysisConfig,
) -> ParsedSession {
    let mut mode = ScanMode::Preamble;
    let mut assembler = Assembler::default();

    for line in body.lines() {
        match mode {
            ScanMode::Closed => {}
            ScanMode::Preamble => {
                if section_header(line) == Some(CONVERSATION_HEADER) {
                    mode = ScanMode::InConversation;
                } else if let Some(caps) = TURN_HEADER.captures(line) {
                    // Bare transcripts without a section opener still count.
                    mode = ScanMode::InConversation;
                    open_turn(&mut assembler, &caps);
                }
            }
            ScanMode::InConversation => {
                if let Some(title) = section_header(line)
                    && TERMINAL_SECTIONS.contains(&title)
                {
                    assembler.flush();
                    mode = ScanMode::Closed;
                } else if let Some(caps) = TURN_HEADER.captures(line) {
                    open_turn(&mut assembler, &caps);
                } else if let Some(entry) = assembler.open.as_mut() {
                    accumulate_line(entry, line);
                }
                // No open entry: the line is preamble noise inside the
                // section; drop it.
            }
        }
    }
    assembler.flush();

    let (session_id, project_name) = extract_session_identity(source_id);
    let duration_seconds = extract_duration_seconds(body);
    let tool_operations = extract_tool_operations(body);

    let metadata = derive_metadata(body, duration_seconds, &tool_operations, config);

    ParsedSession {
        session_id,
        project_name,
        duration_seconds,
        conversation: assembler.entries,
        tool_operations,
        metadata,
    }
}

fn open_turn(assembler: &mut Assembler, caps: &regex::Captures) {
    let index = caps[1].parse::<usize>().unwrap_or(assembler.entries.len() + 1);
    let speaker = if &caps[2] == "User" { Speaker::User } else { Speaker::Assistant };
    assembler.open_entry(index, speaker, caps[3].trim().to_string());
}

/// Feed one non-header line into the open entry.
fn accumulate_line(entry: &mut OpenEntry, line: &str) {
    let trimmed = line.trim();

    // An open payload region swallows everything raw until the next marker
    // closes it (or the entry flushes).
    if entry.payload.is_some() {
        if let Some(label) = payload_marker(trimmed) {
            flush_payload(entry);
            entry.payload = Some((label, Vec::new()));
        } else if let Some((_, lines)) = entry.payload.as_mut() {
            lines.push(line.to_string());
        }
        return;
    }

    // Tool-result entries carry raw payload; fences inside them are content.
    if trimmed.starts_with("```") && entry.kind != EntryKind::ToolResult {
        entry.in_fence = !entry.in_fence;
        push_line(entry, line);
        return;
    }

    if !entry.in_fence && entry.kind != EntryKind::ToolResult {
        if let Some(rest) = trimmed.strip_prefix(TOOL_USED_PREFIX) {
            let name = BACKTICK_NAME
                .captures(rest)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_else(|| rest.trim().to_string());
            entry.kind = EntryKind::ToolUse { tool_name: name };
            return;
        }
        if trimmed.starts_with(TOOL_RESULT_PREFIX) {
            entry.kind = EntryKind::ToolResult;
            return;
        }
        if trimmed == THINKING_MARKER {
            entry.kind = EntryKind::Thinking;
            return;
        }
        if let Some(label) = payload_marker(trimmed) {
            entry.payload = Some((label, Vec::new()));
            return;
        }
    }

    push_line(entry, line);
}

fn payload_marker(trimmed: &str) -> Option<PayloadLabel> {
    match trimmed {
        INPUT_MARKER => Some(PayloadLabel::Input),
        OUTPUT_MARKER => Some(PayloadLabel::Output),
        _ => None,
    }
}

fn push_line(entry: &mut OpenEntry, line: &str) {
    if entry.in_fence || entry.kind == EntryKind::ToolResult {
        entry.content.push(line.to_string());
    } else {
        entry.content.push(strip_list_formatting(line));
    }
}

/// Strip leading markdown list bullets so rendered content reads as prose.
fn strip_list_formatting(line: &str) -> String {
    match LIST_PREFIX.captures(line) {
        Some(caps) => format!("{}{}", &caps[1], &caps[2]),
        None => line.to_string(),
    }
}

/// `## Title` → `Title`; deeper or shallower headers don't count.
fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    let title = trimmed.strip_prefix("## ")?;
    if title.starts_with('#') {
        return None;
    }
    Some(title.trim())
}

fn derive_metadata(
    body: &str,
    duration_seconds: u64,
    tool_operations: &[crate::models::ToolOperation],
    config: &AnalysisConfig,
) -> SessionMetadata {
    use std::collections::HashMap;

    use crate::models::ToolStatus;

    let tool_count = tool_operations.len();
    let error_count =
        tool_operations.iter().filter(|op| op.status == ToolStatus::Error).count();
    let error_rate = error_count as f64 / tool_count.max(1) as f64;

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for op in tool_operations {
        *name_counts.entry(op.name.as_str()).or_insert(0) += 1;
    }
    let has_loops = name_counts.values().any(|&count| count > config.loop_threshold);

    SessionMetadata {
        has_errors: body_has_errors(body),
        is_long_session: duration_seconds > config.long_session_secs,
        has_loops,
        tool_count,
        error_rate,
    }
}
