//! Handler registry for path lookup.
//!
//! The [`HandlerRegistry`] maps paths to handlers and holds at most one
//! fallback handler for paths with no exact registration. Registering a path
//! twice replaces the earlier handler.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RouterError;
use crate::handler::Handler;

/// Registry of handlers keyed by path.
///
/// # Example
///
/// ```
/// use bufroute::handler::Handler;
/// use bufroute::registry::HandlerRegistry;
///
/// let mut registry = HandlerRegistry::new();
/// registry.register("status", Handler::new(|_| Ok(vec![])));
/// assert!(registry.resolve("status").is_ok());
/// assert!(registry.resolve("log").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<Handler>>,
    fallback: Option<Arc<Handler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `path`, returning the handler it replaced.
    pub fn register(&mut self, path: impl Into<String>, handler: Handler) -> Option<Arc<Handler>> {
        self.handlers.insert(path.into(), Arc::new(handler))
    }

    /// Sets the fallback handler, returning the one it replaced.
    pub fn set_fallback(&mut self, handler: Handler) -> Option<Arc<Handler>> {
        self.fallback.replace(Arc::new(handler))
    }

    /// Resolves the handler for `path`: the exact registration first, then the
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoHandler`] when neither exists.
    pub fn resolve(&self, path: &str) -> Result<Arc<Handler>, RouterError> {
        self.handlers
            .get(path)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| RouterError::no_handler(path))
    }

    /// Returns `true` when [`resolve`](Self::resolve) would succeed.
    #[must_use]
    pub fn can_resolve(&self, path: &str) -> bool {
        self.handlers.contains_key(path) || self.fallback.is_some()
    }

    /// Returns `true` when `path` has its own registration.
    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        self.handlers.contains_key(path)
    }

    /// Returns `true` when a fallback handler is set.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Returns the registered paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Returns the number of registered paths, excluding the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no paths are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
