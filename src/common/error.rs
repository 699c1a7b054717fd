//! Error types for the smoke-test CLI
//!
//! Every check in this tool boils down to "the backend answered with a
//! status code we did not expect", so that case carries enough context
//! (call name, expected/actual status, response body) to print a useful
//! diagnostic on its own.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Backend Contract Errors ===
    #[error("{call} returned HTTP {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        call: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("No KYC request found for user '{username}'{}", status_hint(.status))]
    KycNotFound {
        username: String,
        status: Option<String>,
    },

    #[error("KYC request for user '{username}' has no usable id")]
    KycIdMissing { username: String },

    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),
}

fn status_hint(status: &Option<String>) -> String {
    match status {
        Some(s) => format!(" with status '{}'", s),
        None => String::new(),
    }
}

impl Error {
    /// Create an unexpected status error
    pub fn unexpected_status(call: &str, expected: u16, actual: u16, body: &str) -> Self {
        Self::UnexpectedStatus {
            call: call.to_string(),
            expected,
            actual,
            body: body.to_string(),
        }
    }

    /// Create a KYC-not-found error, optionally scoped to a status
    pub fn kyc_not_found(username: &str, status: Option<&str>) -> Self {
        Self::KycNotFound {
            username: username.to_string(),
            status: status.map(str::to_string),
        }
    }

    /// HTTP status carried by this error, if it is a status mismatch
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}
