//! Data models for parsed session transcripts.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`ParsedSession`] - One fully parsed transcript with derived metadata
//! - [`ConversationEntry`] - One User or Assistant turn
//! - [`ToolOperation`] - One extracted tool invocation with its outcome
//! - [`SearchOptions`] / [`SearchResult`] - Query input and ranked output
//! - [`AnalysisConfig`] - Tunable thresholds for the struggle heuristics
//!
//! All model types derive serde so sessions and search results can be emitted
//! as JSON by the CLI.

pub mod search;
pub mod session;

pub use search::{SearchOptions, SearchResult};
pub use session::{
    AnalysisConfig, ConversationEntry, EntryKind, ParsedSession, SessionMetadata, Speaker,
    ToolOperation, ToolStatus, UNKNOWN_PROJECT, UNKNOWN_SESSION_ID,
};
