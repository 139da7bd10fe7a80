//! Core types and error definitions shared by the ragkit crates.
//!
//! # Main types
//!
//! - [`RagkitError`] — Unified error enum for every ragkit subsystem.
//! - [`RagkitResult`] — Convenience alias for `Result<T, RagkitError>`.
//! - [`Role`] — Message role (user, assistant, system).
//! - [`Message`] — A single turn of a conversation or prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Error types ---

/// Top-level error type for the ragkit tools.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum RagkitError {
    /// An error in configuration parsing or validation, including missing credentials.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from an outbound HTTP request.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error raised while computing an embedding.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// An error raised by a vector store backend.
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// An error raised by a text generation backend.
    #[error("Generation error: {0}")]
    Generation(String),

    /// An error in text processing input (e.g. a malformed stop-word list).
    #[error("Text error: {0}")]
    Text(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`RagkitError`].
pub type RagkitResult<T> = Result<T, RagkitError>;

// --- Message types ---

/// The role of the participant that authored a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human end-user.
    User,
    /// The assistant (a model or a local fallback).
    Assistant,
    /// A system-level instruction or prompt.
    System,
}

/// A single message exchanged with a generation backend or kept in history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    pub id: Uuid,
    /// The role of the message author.
    pub role: Role,
    /// The textual content of the message.
    pub content: String,
    /// UTC timestamp of when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a new message with [`Role::User`].
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a new message with [`Role::System`].
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}
