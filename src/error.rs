//! Error types for tdo
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, validation failure, not logged in)
//! - 3: Authentication failed (no matching credentials)
//! - 4: Operation failed (transport error, backend rejection, IO)

use thiserror::Error;

/// Exit codes for the tdo CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const AUTH_FAILED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tdo operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not logged in")]
    NotLoggedIn,

    // Authentication failures (exit code 3)
    //
    // Deliberately generic: the message must not reveal whether the
    // username or the password was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    // Operation failures (exit code 4)
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned status {status} for {method} {path}")]
    Api {
        method: &'static str,
        path: String,
        status: u16,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::Validation(_)
            | Error::NotLoggedIn => exit_codes::USER_ERROR,

            // Authentication failures
            Error::InvalidCredentials => exit_codes::AUTH_FAILED,

            // Operation failures
            Error::Transport(_)
            | Error::Api { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, where an error carries more
    /// than its message
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Api {
                method,
                path,
                status,
            } => Some(serde_json::json!({
                "method": method,
                "path": path,
                "status": status,
            })),
            _ => None,
        }
    }
}

/// Result type alias for tdo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
