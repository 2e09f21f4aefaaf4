//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for transcript markdown bodies
pub struct TranscriptBuilder {
    lines: Vec<String>,
    next_index: usize,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new(), next_index: 1 }
    }

    /// Open with a `## Conversation` section header
    pub fn with_conversation_section(mut self) -> Self {
        self.lines.push("## Conversation".to_string());
        self.lines.push(String::new());
        self
    }

    /// Append a User turn
    pub fn user(self, time: &str, text: &str) -> Self {
        self.turn("User", time, text)
    }

    /// Append an Assistant turn
    pub fn assistant(self, time: &str, text: &str) -> Self {
        self.turn("Assistant", time, text)
    }

    fn turn(mut self, speaker: &str, time: &str, text: &str) -> Self {
        self.lines.push(format!("### {}. {} ({})", self.next_index, speaker, time));
        self.next_index += 1;
        self.lines.push(text.to_string());
        self.lines.push(String::new());
        self
    }

    /// Append a tool banner inside the current turn
    pub fn tool_used(mut self, name: &str) -> Self {
        self.lines.push(format!("**Tool Used:** `{}`", name));
        self
    }

    /// Append a raw line
    pub fn line(mut self, raw: &str) -> Self {
        self.lines.push(raw.to_string());
        self
    }

    /// Close with a terminal section header and trailing content
    pub fn with_terminal_section(mut self, title: &str, body: &str) -> Self {
        self.lines.push(format!("## {}", title));
        self.lines.push(body.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut body = self.lines.join("\n");
        body.push('\n');
        body
    }
}

/// Builder for on-disk transcript directories
pub struct TranscriptDirBuilder {
    temp_dir: TempDir,
}

impl TranscriptDirBuilder {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a transcript file with the given name and body
    pub fn with_transcript(self, name: &str, body: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), body).expect("Failed to write transcript");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

/// A realistic multi-turn transcript with tools, payloads, and a summary
pub fn realistic_transcript() -> String {
    TranscriptBuilder::new()
        .with_conversation_section()
        .user("10:00 AM", "Please fix the failing integration test")
        .assistant("10:01 AM", "Let me look at the test output first")
        .tool_used("bash")
        .line("**Input:**")
        .line("cargo test")
        .line("**Output:**")
        .line("test result: FAILED. 1 failed")
        .assistant("10:04 AM", "The fixture path is wrong, updating it")
        .tool_used("edit_file")
        .line("Result: file updated")
        .with_terminal_section("Session Summary", "Duration: 12 minutes")
        .build()
}
