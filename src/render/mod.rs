//! Thin conversation renderer: structured entries to plain display fragments.
//!
//! Deliberately dumb. The interesting structure lives in the models; this
//! module only decides what one entry or operation looks like as a line of
//! terminal output.

use crate::models::{
    ConversationEntry, EntryKind, ParsedSession, Speaker, ToolOperation, ToolStatus,
};

/// One display fragment for a conversation entry.
pub fn render_entry(entry: &ConversationEntry) -> String {
    let speaker = match entry.speaker {
        Speaker::User => "User",
        Speaker::Assistant => "Assistant",
    };
    let tag = match &entry.kind {
        EntryKind::Message => String::new(),
        EntryKind::Thinking => " [thinking]".to_string(),
        EntryKind::ToolUse { tool_name } => format!(" [tool: {}]", tool_name),
        EntryKind::ToolResult => " [tool result]".to_string(),
    };
    format!("{}. {} ({}){}\n{}", entry.index, speaker, entry.timestamp, tag, entry.content)
}

/// One display fragment for a tool operation.
pub fn render_operation(op: &ToolOperation) -> String {
    let status = match op.status {
        ToolStatus::Success => "ok",
        ToolStatus::Error => "error",
    };
    format!("{} [{}]", op.name, status)
}

/// Full-session display: header, every entry, then the tool operations.
pub fn render_session(session: &ParsedSession) -> String {
    let mut out = format!(
        "{} - {} ({}s)\n",
        session.project_name, session.session_id, session.duration_seconds
    );
    for entry in &session.conversation {
        out.push('\n');
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    if !session.tool_operations.is_empty() {
        out.push_str("\nTools:\n");
        for op in &session.tool_operations {
            out.push_str("  ");
            out.push_str(&render_operation(op));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_entry() {
        let entry = ConversationEntry {
            index: 1,
            speaker: Speaker::User,
            timestamp: "10:00 AM".to_string(),
            content: "Hello".to_string(),
            kind: EntryKind::Message,
        };
        assert_eq!(render_entry(&entry), "1. User (10:00 AM)\nHello");
    }

    #[test]
    fn test_render_tool_use_entry() {
        let entry = ConversationEntry {
            index: 2,
            speaker: Speaker::Assistant,
            timestamp: "10:01 AM".to_string(),
            content: "reading".to_string(),
            kind: EntryKind::ToolUse { tool_name: "read_file".to_string() },
        };
        assert!(render_entry(&entry).contains("[tool: read_file]"));
    }

    #[test]
    fn test_render_session_header_is_plain_ascii() {
        let session = ParsedSession {
            session_id: "abc123".to_string(),
            project_name: "billing".to_string(),
            duration_seconds: 60,
            conversation: Vec::new(),
            tool_operations: Vec::new(),
            metadata: crate::models::SessionMetadata {
                has_errors: false,
                is_long_session: false,
                has_loops: false,
                tool_count: 0,
                error_rate: 0.0,
            },
        };
        let rendered = render_session(&session);
        assert!(rendered.starts_with("billing - abc123 (60s)\n"));
        assert!(rendered.is_ascii());
    }

    #[test]
    fn test_render_operation_status() {
        let op = ToolOperation {
            name: "bash".to_string(),
            status: ToolStatus::Error,
            input: None,
            output: None,
        };
        assert_eq!(render_operation(&op), "bash [error]");
    }
}
