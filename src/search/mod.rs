//! Search and ranking over parsed sessions.
//!
//! # Error Handling Strategy
//!
//! The engine validates its options eagerly and fails closed: malformed
//! options surface as a typed [`SearchOptionsError`] before any filtering
//! runs. Past validation nothing is fatal; callers never need to distinguish
//! "no results" from an internal failure.

pub mod engine;

use thiserror::Error;

pub use engine::{search, search_with};

/// Malformed search options, reported before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchOptionsError {
    #[error("limit must be a positive number")]
    InvalidLimit,
    #[error("min duration ({min}s) must not exceed max duration ({max}s)")]
    InvalidDurationRange { min: u64, max: u64 },
}
