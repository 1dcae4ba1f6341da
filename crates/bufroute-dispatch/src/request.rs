//! Request deserialisation for the dispatch loop.
//!
//! Each JSONL line carries one call: the prefixed operation name and its
//! positional arguments.
//!
//! ```json
//! {"method":"bufroute:open","args":["status",{"id":"123"}]}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::errors::DispatchError;

/// Parsed request from the plugin host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcRequest {
    /// Prefixed operation name, e.g. `bufroute:internal:load`.
    pub method: String,
    /// Positional arguments, validated per operation.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl RpcRequest {
    /// Parses a JSONL line into a request.
    ///
    /// Trailing whitespace (including the newline delimiter) is trimmed before
    /// parsing.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedJsonl` if the line is empty, is not
    /// JSON, or does not match the request envelope.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }

        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// Validates that the method is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidStructure` if the method is empty or
    /// contains only whitespace.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.method.trim().is_empty() {
            return Err(DispatchError::invalid_structure("method field is empty"));
        }
        Ok(())
    }

    /// Returns the normalised method (trimmed).
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.trim()
    }
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}
