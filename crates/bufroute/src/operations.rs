//! Names of the remotely callable operations.
//!
//! Every operation is exposed as `{prefix}:{operation}`. The router uses the
//! qualified names when it wires host signals and commands; the dispatch
//! adapter uses [`OperationNames::parse`] to route incoming calls.

use std::fmt;

/// Default operation-name prefix.
pub const DEFAULT_PREFIX: &str = "bufroute";

/// A remotely callable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Present a resource in a view.
    Open,
    /// Populate a resource without presenting it.
    Preload,
    /// Run a handler action for a view.
    Action,
    /// Host read signal for a view.
    Load,
    /// Host write signal for a view.
    Save,
    /// Host notification that a view closed.
    Close,
    /// Invocation of a user command defined by `setup:command`.
    Command,
    /// Define a user command for a path.
    SetupCommand,
}

impl Operation {
    /// Every operation.
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::Preload,
        Self::Action,
        Self::Load,
        Self::Save,
        Self::Close,
        Self::Command,
        Self::SetupCommand,
    ];

    /// Unprefixed name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Preload => "preload",
            Self::Action => "action",
            Self::Load => "internal:load",
            Self::Save => "internal:save",
            Self::Close => "internal:close",
            Self::Command => "internal:command",
            Self::SetupCommand => "setup:command",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation names under a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    prefix: String,
}

impl Default for OperationNames {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl OperationNames {
    /// Creates operation names under `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix applied to every operation.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fully qualified name of `operation`.
    #[must_use]
    pub fn qualified(&self, operation: Operation) -> String {
        format!("{}:{}", self.prefix, operation.as_str())
    }

    /// Maps a qualified method name back to its operation.
    #[must_use]
    pub fn parse(&self, method: &str) -> Option<Operation> {
        let bare = method
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(':')?;
        Operation::ALL
            .into_iter()
            .find(|operation| operation.as_str() == bare)
    }
}
