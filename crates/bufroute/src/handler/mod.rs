//! Handlers and the resources they operate on.
//!
//! A [`Handler`] bundles the callbacks registered for a path: a required
//! `load`, an optional `save`, and any number of named actions. Whether a
//! resource is writable is decided solely by the presence of `save`.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::HandlerError;
use crate::host::ViewId;
use crate::name::{Params, ResourceName};

/// Lines placed into a view by `load`.
pub type Content = Vec<String>;

type LoadFn = dyn Fn(&LiveResource) -> Result<Content, HandlerError> + Send + Sync;
type SaveFn = dyn Fn(&LiveResource, &[String]) -> Result<(), HandlerError> + Send + Sync;
type ActionFn = dyn Fn(&LiveResource, &Params) -> Result<Value, HandlerError> + Send + Sync;

/// A resource attached to a host view, passed to every handler callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveResource {
    view: ViewId,
    name: ResourceName,
}

impl LiveResource {
    /// Creates a resource for the given view and name.
    #[must_use]
    pub fn new(view: ViewId, name: ResourceName) -> Self {
        Self { view, name }
    }

    /// Host view backing the resource.
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Full resource name.
    #[must_use]
    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    /// Requested path; for fallback handlers this is the unregistered path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.name.path()
    }

    /// Parameters carried by the name.
    #[must_use]
    pub fn params(&self) -> &Params {
        self.name.params()
    }

    /// Fragment carried by the name.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.name.fragment()
    }
}

/// Callbacks registered for a path.
///
/// # Example
///
/// ```
/// use bufroute::handler::Handler;
///
/// let handler = Handler::new(|resource| Ok(vec![format!("# {}", resource.path())]))
///     .with_save(|_resource, _lines| Ok(()))
///     .with_action("refresh", |_resource, _params| Ok(serde_json::Value::Null));
/// assert!(handler.can_save());
/// assert!(handler.has_action("refresh"));
/// ```
pub struct Handler {
    load: Box<LoadFn>,
    save: Option<Box<SaveFn>>,
    actions: BTreeMap<String, Box<ActionFn>>,
}

impl Handler {
    /// Creates a read-only handler from its `load` callback.
    pub fn new<F>(load: F) -> Self
    where
        F: Fn(&LiveResource) -> Result<Content, HandlerError> + Send + Sync + 'static,
    {
        Self {
            load: Box::new(load),
            save: None,
            actions: BTreeMap::new(),
        }
    }

    /// Adds a `save` callback, making resources of this handler writable.
    #[must_use]
    pub fn with_save<F>(mut self, save: F) -> Self
    where
        F: Fn(&LiveResource, &[String]) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.save = Some(Box::new(save));
        self
    }

    /// Adds a named action, replacing any action with the same name.
    #[must_use]
    pub fn with_action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&LiveResource, &Params) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Box::new(action));
        self
    }

    /// Returns `true` when the handler defines `save`.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.save.is_some()
    }

    /// Returns `true` when the handler defines the named action.
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Names of the handler's actions, sorted.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub(crate) fn load(&self, resource: &LiveResource) -> Result<Content, HandlerError> {
        (self.load)(resource)
    }

    /// Runs `save`, or returns `None` when the handler cannot save.
    pub(crate) fn save(
        &self,
        resource: &LiveResource,
        lines: &[String],
    ) -> Option<Result<(), HandlerError>> {
        self.save.as_ref().map(|save| save(resource, lines))
    }

    /// Runs the named action, or returns `None` when it is not defined.
    pub(crate) fn act(
        &self,
        name: &str,
        resource: &LiveResource,
        params: &Params,
    ) -> Option<Result<Value, HandlerError>> {
        self.actions
            .get(name)
            .map(|action| action(resource, params))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("can_save", &self.can_save())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
