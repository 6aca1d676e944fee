use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why the model provider could not be reached or refused the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCause {
    Network,
    Auth,
    RateLimited,
    Timeout,
    Service,
}

impl fmt::Display for TransportCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportCause::Network => "network",
            TransportCause::Auth => "auth",
            TransportCause::RateLimited => "rate limited",
            TransportCause::Timeout => "timeout",
            TransportCause::Service => "service",
        })
    }
}

/// Every way a recommendation call can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("model provider transport error ({cause}): {message}")]
    Transport {
        cause: TransportCause,
        message: String,
    },

    #[error("unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    #[error("model output is not valid recommendation JSON: {reason}")]
    MalformedJson { reason: String, raw_content: String },
}

impl EngineError {
    pub fn transport(cause: TransportCause, message: impl Into<String>) -> Self {
        EngineError::Transport {
            cause,
            message: message.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>, raw_content: &str) -> Self {
        EngineError::MalformedJson {
            reason: reason.into(),
            raw_content: raw_content.to_string(),
        }
    }
}

/// Credential resolution failures. These surface at startup, before any
/// recommendation call.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("environment variable {0} is not set")]
    MissingVariable(String),

    #[error("failed to read secret file {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("credential from {0} is empty")]
    Empty(String),
}
