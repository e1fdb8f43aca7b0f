//! Tether - a relationship tracking library for staying in touch.
//!
//! This library provides the core functionality for the `tt` CLI tool:
//! the person domain model, contact status classification, streak
//! calculation, sorting/filtering, durable persistence with undo, bulk
//! mark-contacted operations, and address-book import deduplication.

pub mod action_log;
pub mod bulk;
pub mod cli;
pub mod commands;
pub mod import;
pub mod models;
pub mod status;
pub mod storage;
pub mod streak;
pub mod view;


/// Library-level error type for Tether operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Person not found: {0}")]
    NotFound(String),

    #[error("No action to undo")]
    NoActionToUndo,

    #[error("No people found in category: {0}")]
    EmptyCategory(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Tether operations.
pub type Result<T> = std::result::Result<T, Error>;
