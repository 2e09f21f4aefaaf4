//! Transcript discovery and corpus building.
//!
//! # Error Handling Strategy
//!
//! The corpus builder combines graceful degradation with error rate tracking:
//!
//! - **File-level failures**: transcripts that cannot be read are logged and
//!   skipped, allowing a partial corpus.
//! - **Error rate tracking**: if more than half of the discovered transcripts
//!   fail to load, the build returns an error rather than accepting
//!   fundamentally broken input.
//! - Parsing itself never fails; every readable file becomes a session.

pub mod builder;

pub use builder::{build_corpus, discover_transcripts};
