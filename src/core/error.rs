//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ScriptHubError`] which covers every failure that can
//! reach a command, plus the two narrower error enums used at component seams:
//! [`TransportError`] for the relay chain and [`StorageError`] for the
//! persistent key/value store.
//!
//! # Public API
//! - [`ScriptHubError`]: Main error enum covering all failure modes
//! - [`TransportError`]: Raised only after every relay has been tried
//! - [`StorageError`]: Storage read/write failures (swallowed by the caches)
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ScriptHubError>`
//!
//! # Propagation
//! - **Transport**: individual relay failures never surface; only the aggregate does
//! - **Storage**: always swallowed by the caches, surfaced only by `cache` commands
//! - **Selection**: bad card numbers or a missing grid are reported to the user

use std::path::PathBuf;
use thiserror::Error;

/// Aggregate failure of the relay chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("All proxies failed")]
    AllRelaysFailed { attempts: usize },

    #[error("No relays configured")]
    NoRelays,
}

/// Persistent storage failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage quota exceeded ({used} of {quota} bytes)")]
    QuotaExceeded { used: u64, quota: u64 },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed storage record at '{path}': {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Domain-specific error types for script-hub
#[derive(Error, Debug)]
pub enum ScriptHubError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid relay envelope: {reason}")]
    Parse { reason: String },

    #[error("Relay answered with HTTP {status}")]
    RelayStatus { status: u16 },

    // Configuration errors
    #[error("Could not determine the {kind} directory")]
    DirectoryNotFound { kind: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown filter '{input}'. Use one of: all, universal, keyless, trending")]
    UnknownFilter { input: String },

    // Grid state and selection errors
    #[error("No scripts listed yet. Run 'script-hub list' first.")]
    NoGridState,

    #[error("Failed to parse grid state '{path}': {source}")]
    GridStateParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Card {index} is out of range (1-{max} available)")]
    CardOutOfRange { index: usize, max: usize },

    #[error("Card numbers start at 1 (got 0)")]
    ZeroCard,

    #[error("No script target provided. Usage: script-hub show <number|slug>")]
    NoTarget,

    #[error("Unknown command '{input}'. Type 'h' for help")]
    UnknownCommand { input: String },

    // Clipboard errors
    #[error("Clipboard unavailable: {reason}")]
    Clipboard { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience type alias for Results using ScriptHubError
pub type Result<T> = std::result::Result<T, ScriptHubError>;

impl ScriptHubError {
    /// Create a relay envelope parse error
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown filter error
    pub fn unknown_filter(input: impl Into<String>) -> Self {
        Self::UnknownFilter {
            input: input.into(),
        }
    }

    /// Create a card out of range error
    pub fn card_out_of_range(index: usize, max: usize) -> Self {
        Self::CardOutOfRange { index, max }
    }

    /// Create an unknown browse command error
    pub fn unknown_command(input: impl Into<String>) -> Self {
        Self::UnknownCommand {
            input: input.into(),
        }
    }

    /// Create a clipboard error
    pub fn clipboard(reason: impl Into<String>) -> Self {
        Self::Clipboard {
            reason: reason.into(),
        }
    }

    /// Create a grid state parse error
    pub fn grid_state_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::GridStateParseFailed {
            path: path.into(),
            source,
        }
    }
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
