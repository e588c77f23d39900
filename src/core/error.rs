//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`RepoRenderError`] which provides comprehensive error handling
//! for all repo-render operations. It uses `thiserror` for ergonomic error definitions
//! and includes specialized error constructors for common failure scenarios.
//!
//! # Public API
//! - [`RepoRenderError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, RepoRenderError>`
//!
//! # Error Categories
//! - **Repository listing**: Not found, rate limited, unauthorized, unexpected status
//! - **Content fetching**: All fetch tiers exhausted, undecodable payloads
//! - **Transport**: Network-level failures surfaced from the HTTP client
//! - **Settings**: Config directory resolution, I/O, serialization errors
//!
//! A listing-level error aborts the whole snapshot build and is surfaced to the
//! caller as a single message. A per-file fetch error never becomes a
//! `RepoRenderError` at the command boundary; it is captured as a failed
//! resolution value and rendered as an inline placeholder instead.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for repo-render
#[derive(Error, Debug)]
pub enum RepoRenderError {
    // Repository identification errors
    #[error("Invalid repository: '{input}'. Use a GitHub URL or the owner/name form")]
    InvalidRepoUrl { input: String },

    // Repository listing errors
    #[error("Repository not found or is private")]
    NotFound,

    #[error("GitHub API rate limit exceeded. Rate limit resets at {reset}. Consider adding a GitHub token.")]
    RateLimited { reset: String },

    #[error("Invalid GitHub token. Please check your token and try again.")]
    Unauthorized,

    #[error("Failed to fetch repository: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    // Content fetch errors
    #[error("All fetch methods failed for {path}: {reasons}")]
    AllMethodsFailed { path: String, reasons: String },

    #[error("Failed to decode content for {path}: {detail}")]
    ContentDecode { path: String, detail: String },

    // Settings errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to write settings file '{path}': {source}")]
    SettingsWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using RepoRenderError
pub type Result<T> = std::result::Result<T, RepoRenderError>;

impl RepoRenderError {
    /// Create an invalid repository URL error
    pub fn invalid_repo_url(input: impl Into<String>) -> Self {
        Self::InvalidRepoUrl {
            input: input.into(),
        }
    }

    /// Create a rate limited error, defaulting the reset hint when the
    /// `X-RateLimit-Reset` header was absent or unreadable
    pub fn rate_limited(reset: Option<String>) -> Self {
        Self::RateLimited {
            reset: reset.unwrap_or_else(|| "unknown".to_string()),
        }
    }

    /// Create an unexpected HTTP status error
    pub fn unexpected_status(status: u16) -> Self {
        Self::UnexpectedStatus { status }
    }

    /// Create an all-fetch-methods-failed error for a single file
    pub fn all_methods_failed(path: impl Into<String>, reasons: impl Into<String>) -> Self {
        Self::AllMethodsFailed {
            path: path.into(),
            reasons: reasons.into(),
        }
    }

    /// Create a content decode error
    pub fn content_decode(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ContentDecode {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a settings write failed error
    pub fn settings_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SettingsWriteFailed {
            path: path.into(),
            source,
        }
    }
}
