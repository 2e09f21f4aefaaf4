//! Transcript Insights - Parse and search AI coding session transcripts
//!
//! This library turns free-form markdown transcripts of AI-assisted coding
//! sessions into structured, queryable session records. It supports:
//!
//! - Parsing conversation turns, tool invocations, and timing metadata from
//!   markdown transcripts
//! - Heuristic struggle/error classification with exclusion-first rules
//! - Filtered, keyword-ranked, paginated search across many sessions
//! - Discovering and parsing whole transcript directories in parallel
//!
//! # Example
//!
//! ```
//! use transcript_insights::models::SearchOptions;
//! use transcript_insights::parsers::parse_transcript;
//! use transcript_insights::search::search;
//!
//! let body = "### 1. User (10:00 AM)\nFix the flaky test\n### 2. Assistant (10:01 AM)\nLooking into it\n";
//! let session = parse_transcript("session-ci-abc123.md", body);
//! assert_eq!(session.conversation.len(), 2);
//!
//! let options = SearchOptions { keyword: Some("flaky".to_string()), ..Default::default() };
//! let results = search(std::slice::from_ref(&session), &options)?;
//! assert_eq!(results.len(), 1);
//! # Ok::<(), transcript_insights::search::SearchOptionsError>(())
//! ```

pub mod cli;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod render;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use indexer::build_corpus;
pub use models::{ParsedSession, SearchOptions, SearchResult};
pub use parsers::parse_transcript;
pub use search::{SearchOptionsError, search};
