//! Domain errors raised by router operations.
//!
//! Parsing failures (`MalformedName`, `InvalidModifier`) are always surfaced to
//! the caller. Resolution failures are surfaced as the result of the operation
//! that triggered them, except during a resource read, where the router
//! renders them into the view instead. Handler failures carry the phase that
//! raised them so the dispatch boundary can report them precisely.

use std::fmt;

use thiserror::Error;

/// Boxed error type accepted as the cause of handler and host failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors arising from router operations.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A resource name could not be parsed.
    #[error("malformed resource name '{name}': {message}")]
    MalformedName {
        /// Name that failed to parse.
        name: String,
        /// Description of the syntax problem.
        message: String,
    },

    /// A host modifier string could not be classified into a split style.
    #[error("invalid modifier '{modifier}': {message}")]
    InvalidModifier {
        /// Modifier text supplied by the host.
        modifier: String,
        /// Description of the problem.
        message: String,
    },

    /// The router was constructed without a scheme.
    #[error("router scheme must not be empty")]
    EmptyScheme,

    /// The router was constructed with a scheme that cannot appear in names.
    #[error("'{scheme}' is not a valid scheme")]
    IllegalScheme {
        /// Rejected scheme.
        scheme: String,
    },

    /// A resource name belongs to a different scheme than the router's.
    #[error("expected scheme '{expected}' but resource uses '{found}'")]
    InvalidScheme {
        /// Scheme owned by the router.
        expected: String,
        /// Scheme found in the resource name.
        found: String,
    },

    /// No handler is registered for the path and no fallback is set.
    #[error("no handler registered for path '{path}'")]
    NoHandler {
        /// Path that was looked up.
        path: String,
    },

    /// The resolved handler does not define the requested action.
    #[error("handler for '{path}' has no action '{action}'")]
    NoSuchAction {
        /// Path the handler was resolved for.
        path: String,
        /// Requested action name.
        action: String,
    },

    /// A write was requested for a resource whose handler cannot save.
    #[error("resource '{path}' is not writable")]
    NotWritable {
        /// Path the handler was resolved for.
        path: String,
    },

    /// A handler callback failed.
    #[error("{phase} failed for '{path}': {source}")]
    Handler {
        /// Path the handler was resolved for.
        path: String,
        /// Lifecycle phase that raised the error.
        phase: HandlerPhase,
        /// Error raised by the handler.
        #[source]
        source: HandlerError,
    },

    /// A host primitive failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl RouterError {
    /// Creates a malformed name error.
    pub fn malformed_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid modifier error.
    pub fn invalid_modifier(modifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModifier {
            modifier: modifier.into(),
            message: message.into(),
        }
    }

    /// Creates a no-handler error.
    pub fn no_handler(path: impl Into<String>) -> Self {
        Self::NoHandler { path: path.into() }
    }

    /// Creates a no-such-action error.
    pub fn no_such_action(path: impl Into<String>, action: impl Into<String>) -> Self {
        Self::NoSuchAction {
            path: path.into(),
            action: action.into(),
        }
    }

    /// Creates a not-writable error.
    pub fn not_writable(path: impl Into<String>) -> Self {
        Self::NotWritable { path: path.into() }
    }

    /// Wraps a handler failure with its path and phase.
    pub fn handler(path: impl Into<String>, phase: HandlerPhase, source: HandlerError) -> Self {
        Self::Handler {
            path: path.into(),
            phase,
            source,
        }
    }
}

/// Lifecycle phase in which a handler callback ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerPhase {
    /// `load` populating a view.
    Load,
    /// `save` writing a view back.
    Save,
    /// A named action.
    Action(String),
}

impl fmt::Display for HandlerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Save => f.write_str("save"),
            Self::Action(name) => write!(f, "action '{name}'"),
        }
    }
}

/// Error raised by handler code.
///
/// Handlers report failures with a human-readable message and, optionally,
/// the underlying cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HandlerError {
    /// Creates a handler error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a handler error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Error raised by a [`Host`](crate::host::Host) primitive.
#[derive(Debug, Error)]
#[error("host operation '{operation}' failed: {message}")]
pub struct HostError {
    operation: String,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HostError {
    /// Creates a host error for the named primitive.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a host error wrapping an underlying cause.
    pub fn with_source(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the host primitive that failed.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}
