//! Response serialisation helpers for the dispatch loop.
//!
//! Every request receives exactly one JSONL response line: either a result
//! carrying the operation's value or an error carrying a message and status.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::errors::DispatchError;

/// Response messages sent to the plugin host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchMessage {
    /// The operation completed.
    Result {
        /// Operation-specific value; `null` when there is nothing to report.
        value: Value,
    },
    /// The operation failed.
    Error {
        /// Human-readable description of the failure.
        message: String,
        /// Status code, see [`DispatchError::exit_status`].
        status: i32,
    },
}

impl DispatchMessage {
    /// Creates a result message.
    #[must_use]
    pub const fn result(value: Value) -> Self {
        Self::Result { value }
    }

    /// Creates an error message describing `error`.
    #[must_use]
    pub fn error(error: &DispatchError) -> Self {
        Self::Error {
            message: error.to_string(),
            status: error.exit_status(),
        }
    }
}

/// Writer that serialises dispatch messages to a stream.
///
/// Each message is framed as one line and flushed immediately so the host
/// can read it without waiting for the stream to close.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a message as a JSONL line and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation, writing or flushing fails.
    pub fn write_message(&mut self, message: &DispatchMessage) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a result message.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_result(&mut self, value: Value) -> Result<(), DispatchError> {
        self.write_message(&DispatchMessage::result(value))
    }

    /// Writes an error message for `error`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_error(&mut self, error: &DispatchError) -> Result<(), DispatchError> {
        self.write_message(&DispatchMessage::error(error))
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
