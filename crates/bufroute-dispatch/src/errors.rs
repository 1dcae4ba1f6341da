//! Error types for request dispatch failures.
//!
//! Each variant maps to one failure mode of the JSONL boundary and carries
//! enough context to produce an actionable message for the calling plugin.

use std::io;

use bufroute::RouterError;
use bufroute_config::ConfigError;
use thiserror::Error;

/// Errors surfaced while parsing, validating and dispatching requests.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request line could not be parsed as valid JSON.
    #[error("malformed JSONL: {message}")]
    MalformedJsonl {
        /// Description of the parse failure.
        message: String,
        /// Underlying JSON parse error, if any.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request JSON does not match the `{"method", "args"}` envelope.
    #[error("invalid request structure: {message}")]
    InvalidStructure {
        /// Description of the structural problem.
        message: String,
    },

    /// Method is not one of the router's prefixed operations.
    #[error("unknown operation '{method}'")]
    UnknownOperation {
        /// The unrecognised method name.
        method: String,
    },

    /// Arguments do not satisfy the operation's schema.
    #[error("invalid arguments for '{operation}': {message}")]
    InvalidArguments {
        /// Operation whose arguments were rejected.
        operation: String,
        /// Description of the validation failure.
        message: String,
    },

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Size of the request in bytes.
        size: usize,
        /// Maximum permitted size in bytes.
        max_size: usize,
    },

    /// The router rejected the operation.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The configuration cannot drive a router.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Response serialisation failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Returns the status reported to the caller for this error.
    ///
    /// Protocol, argument and router failures return 1. Infrastructure
    /// failures (configuration, IO, serialisation) return 2.
    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        match self {
            Self::MalformedJsonl { .. }
            | Self::InvalidStructure { .. }
            | Self::UnknownOperation { .. }
            | Self::InvalidArguments { .. }
            | Self::RequestTooLarge { .. }
            | Self::Router(_) => 1,
            Self::Config(_) | Self::Io(_) | Self::SerializeResponse(_) => 2,
        }
    }

    /// Creates a malformed JSONL error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed JSONL error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJsonl {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Creates an unknown operation error.
    pub fn unknown_operation(method: impl Into<String>) -> Self {
        Self::UnknownOperation {
            method: method.into(),
        }
    }

    /// Creates an invalid arguments error for the named operation.
    pub fn invalid_arguments(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}
