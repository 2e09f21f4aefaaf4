use serde::{Deserialize, Serialize};

/// Tunable analysis thresholds.
///
/// The defaults are the observable behavior of the analyzer; callers that want
/// different sensitivity can override individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Sessions longer than this many seconds count as long sessions.
    pub long_session_secs: u64,
    /// A tool name repeating more than this many times counts as a loop.
    pub loop_threshold: usize,
    /// Error rates above this fraction count as a high-error-rate struggle.
    pub high_error_rate: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { long_session_secs: 1800, loop_threshold: 3, high_error_rate: 0.3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Assistant,
}

/// What kind of turn a conversation entry represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Plain user or assistant message.
    Message,
    /// Assistant thinking/planning block.
    Thinking,
    /// Turn that invokes a tool.
    ToolUse { tool_name: String },
    /// Turn that carries a tool's result payload.
    ToolResult,
}

/// One User or Assistant turn within a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// 1-based ordinal within the transcript.
    pub index: usize,
    pub speaker: Speaker,
    /// Free-text time label captured from the turn header, not reparsed.
    pub timestamp: String,
    pub content: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolStatus {
    Success,
    Error,
}

/// One tool invocation recorded in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOperation {
    pub name: String,
    pub status: ToolStatus,
    pub input: Option<String>,
    pub output: Option<String>,
}

/// Aggregate signals computed once when a session is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub has_errors: bool,
    pub is_long_session: bool,
    pub has_loops: bool,
    pub tool_count: usize,
    /// Fraction of tool operations with error status, in [0, 1].
    pub error_rate: f64,
}

/// One parsed transcript: the structured form of a recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSession {
    pub session_id: String,
    pub project_name: String,
    pub duration_seconds: u64,
    pub conversation: Vec<ConversationEntry>,
    pub tool_operations: Vec<ToolOperation>,
    pub metadata: SessionMetadata,
}

pub const UNKNOWN_SESSION_ID: &str = "unknown";
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

impl ParsedSession {
    /// Heuristic struggle signals for this session, as stable slugs.
    ///
    /// A session "has struggle" iff this list is non-empty.
    pub fn struggle_indicators(&self, config: &AnalysisConfig) -> Vec<String> {
        let mut indicators = Vec::new();
        if self.metadata.is_long_session {
            indicators.push("long-session".to_string());
        }
        if self.metadata.error_rate > config.high_error_rate {
            indicators.push("high-error-rate".to_string());
        }
        if self.metadata.has_loops {
            indicators.push("repetitive-tool-use".to_string());
        }
        if self.metadata.has_errors {
            indicators.push("frequent-errors".to_string());
        }
        indicators
    }

    pub fn has_struggle(&self, config: &AnalysisConfig) -> bool {
        !self.struggle_indicators(config).is_empty()
    }
}
