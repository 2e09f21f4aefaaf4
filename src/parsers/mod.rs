//! Markdown transcript parsers.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach: transcripts are
//! noisy, partial results beat hard failures.
//!
//! - **Parse anomalies** (unrecognized line shapes, unmatched headers) never
//!   raise; they degrade into embedded content of the open entry or are
//!   skipped when no entry is open.
//! - **Extraction misses** (no duration pattern, no identity pattern, no tool
//!   markers) resolve to documented fallback defaults, not errors.
//! - Every input, including empty or garbled text, assembles into a
//!   best-effort [`crate::models::ParsedSession`].

pub mod metadata;
pub mod struggle;
pub mod tools;
pub mod transcript;

pub use metadata::{extract_duration_seconds, extract_session_identity};
pub use struggle::{body_has_errors, is_error_context};
pub use tools::extract_tool_operations;
pub use transcript::{parse_transcript, parse_transcript_with};
