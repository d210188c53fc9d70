//! # SDK Errors
//!
//! One error type for the whole SDK. Every fallible public operation returns
//! [`SdkResult`], so callers match on a single enum instead of juggling a
//! different error per module.
//!
//! The variants follow the failure classes a client actually needs to tell
//! apart:
//!
//! - malformed strings (`Format`) vs. well-formed but unacceptable values
//!   (`Validation`),
//! - builder misuse (`IncompleteTransaction`),
//! - bad key material (`InvalidKey`, `SeedLength`),
//! - trouble on the wire (`Network`, `Timeout`), which the request pipeline
//!   retries before giving up.
//!
//! Signature verification is deliberately absent. A bad signature is a
//! boolean `false`, not an error.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type SdkResult<T> = Result<T, SdkError>;

/// Everything that can go wrong inside the SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A hex, address, amount, or wire payload could not be decoded.
    #[error("format error: {0}")]
    Format(String),

    /// A structurally decodable value that is not acceptable here,
    /// e.g. a bad recipient or a self-transfer.
    #[error("validation error: {0}")]
    Validation(String),

    /// `TransactionBuilder::build` was called before a required field was set.
    #[error("incomplete transaction: missing {field}")]
    IncompleteTransaction { field: &'static str },

    /// Secret key material is missing or has the wrong length.
    ///
    /// The message never includes key bytes.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// HD seed shorter than the required minimum.
    #[error("seed too short: need at least {minimum} bytes, got {actual}")]
    SeedLength { minimum: usize, actual: usize },

    /// Transport failure, non-2xx status, or an envelope reporting failure.
    #[error("network error after {attempts} attempt(s): {message}")]
    Network { message: String, attempts: u32 },

    /// A deadline elapsed, either on a single call or while waiting for
    /// a transaction to reach a terminal status.
    #[error("timed out waiting for {what} after {after_ms}ms ({attempts} attempt(s))")]
    Timeout {
        what: String,
        after_ms: u64,
        attempts: u32,
    },

    /// Reading or writing a wallet file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// Shorthand for a single-attempt network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            attempts: 1,
        }
    }

    /// `true` for failures the request pipeline may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Rewrites the attempt counter on network and timeout errors.
    ///
    /// Other variants pass through untouched.
    pub fn with_attempts(self, n: u32) -> Self {
        match self {
            Self::Network { message, .. } => Self::Network {
                message,
                attempts: n,
            },
            Self::Timeout { what, after_ms, .. } => Self::Timeout {
                what,
                after_ms,
                attempts: n,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
