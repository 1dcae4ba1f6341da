//! Resource routing and lifecycle management.
//!
//! The [`Router`] owns a scheme and a [`HandlerRegistry`]. It builds names for
//! requested resources, presents them through the opener policy, and reacts to
//! the host's read and write signals by resolving the view's current name back
//! to a handler:
//!
//! ```text
//! Unloaded -> Loading -> LoadedWritable | LoadedReadOnly | LoadFailed
//! LoadedWritable -> Saving -> LoadedWritable
//! ```
//!
//! Load failures of any kind are rendered into the view, which is then made
//! read-only, so a broken handler leaves an inspectable view behind rather
//! than a host-level fault. Save failures propagate to the caller and leave
//! the view's unsaved changes in place.

use std::collections::HashMap;
use std::error::Error as _;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{HandlerPhase, RouterError};
use crate::handler::{Handler, LiveResource};
use crate::host::{Host, SignalHandle, ViewId};
use crate::name::{Params, ResourceName, is_valid_scheme};
use crate::opener::{HostOp, OpenerOptions, plan};
use crate::operations::{Operation, OperationNames};
use crate::registry::HandlerRegistry;

/// Tracing target for router operations.
pub(crate) const ROUTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::router");

/// Lifecycle state of a view's resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceState {
    /// `load` is running.
    Loading,
    /// Loaded by a handler that can save.
    LoadedWritable,
    /// Loaded by a handler without `save`.
    LoadedReadOnly,
    /// Resolution or `load` failed; the view shows the error.
    LoadFailed,
    /// `save` is running.
    Saving,
}

impl ResourceState {
    /// Stable snake_case label, as reported over the dispatch protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::LoadedWritable => "loaded_writable",
            Self::LoadedReadOnly => "loaded_read_only",
            Self::LoadFailed => "load_failed",
            Self::Saving => "saving",
        }
    }

    /// Whether the view holds content produced by its handler.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        matches!(
            self,
            Self::LoadedWritable | Self::LoadedReadOnly | Self::Saving
        )
    }
}

/// Read-signal binding returned by [`Router::bind_signals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBinding {
    /// Scheme whose names trigger the signal.
    pub scheme: String,
    /// Operation the host invokes on read.
    pub operation: String,
    /// Host handle for the binding.
    pub handle: SignalHandle,
}

/// Routes resource names to handlers and drives their lifecycle.
///
/// # Example
///
/// ```
/// use bufroute::handler::Handler;
/// use bufroute::name::Params;
/// use bufroute::router::Router;
///
/// let mut router = Router::new("gitui").expect("valid scheme");
/// router.register("status", Handler::new(|_| Ok(vec!["clean".into()])));
///
/// let params: Params = [("id", "123")].into_iter().collect();
/// let name = router.create_name("status", &params, None).expect("name");
/// assert_eq!(name, "gitui://status;id=123");
/// ```
#[derive(Debug)]
pub struct Router {
    scheme: String,
    operations: OperationNames,
    registry: HandlerRegistry,
    states: HashMap<ViewId, ResourceState>,
    binding: Option<SignalBinding>,
}

impl Router {
    /// Creates a router owning `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::EmptyScheme`] for an empty scheme and
    /// [`RouterError::IllegalScheme`] for one that cannot prefix a name.
    pub fn new(scheme: impl Into<String>) -> Result<Self, RouterError> {
        let scheme = scheme.into();
        if scheme.is_empty() {
            return Err(RouterError::EmptyScheme);
        }
        if !is_valid_scheme(&scheme) {
            return Err(RouterError::IllegalScheme { scheme });
        }
        Ok(Self {
            scheme,
            operations: OperationNames::default(),
            registry: HandlerRegistry::new(),
            states: HashMap::new(),
            binding: None,
        })
    }

    /// Replaces the operation-name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.operations = OperationNames::new(prefix);
        self
    }

    /// Scheme owned by the router.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Operation names used when wiring the host.
    #[must_use]
    pub fn operations(&self) -> &OperationNames {
        &self.operations
    }

    /// Handler registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Registers a handler for `path`, replacing any earlier registration.
    pub fn register(&mut self, path: impl Into<String>, handler: Handler) -> Option<Arc<Handler>> {
        self.registry.register(path, handler)
    }

    /// Sets the handler used for paths without a registration.
    pub fn set_fallback(&mut self, handler: Handler) -> Option<Arc<Handler>> {
        self.registry.set_fallback(handler)
    }

    /// Lifecycle state recorded for a view; `None` means unloaded.
    #[must_use]
    pub fn state(&self, view: ViewId) -> Option<ResourceState> {
        self.states.get(&view).copied()
    }

    /// Builds the canonical name for a resource.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoHandler`] when `path` is not registered and no
    /// fallback is set, or [`RouterError::MalformedName`] when a parameter
    /// key is empty.
    pub fn create_name(
        &self,
        path: &str,
        params: &Params,
        fragment: Option<&str>,
    ) -> Result<String, RouterError> {
        if !self.registry.can_resolve(path) {
            return Err(RouterError::no_handler(path));
        }
        let name = ResourceName::new(self.scheme.as_str(), path)?
            .with_params(params.clone())
            .with_fragment(fragment.map(str::to_owned));
        if params.iter().any(|(key, _)| key.is_empty()) {
            return Err(RouterError::malformed_name(
                name.format(),
                "parameter keys must not be empty",
            ));
        }
        Ok(name.format())
    }

    /// Presents a resource in a view and returns its name.
    ///
    /// Content is not loaded here; the host signals a read for the attached
    /// view, which arrives at [`on_resource_read`](Self::on_resource_read).
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoHandler`] before touching the host when no
    /// handler matches, or a host error from the attachment steps.
    pub fn open<H>(
        &self,
        host: &mut H,
        path: &str,
        params: &Params,
        fragment: Option<&str>,
        options: OpenerOptions,
    ) -> Result<String, RouterError>
    where
        H: Host + ?Sized,
    {
        let name = self.create_name(path, params, fragment)?;
        let ops = plan(&name, options, host.find_view(&name));
        debug!(
            target: ROUTER_TARGET,
            name = name.as_str(),
            split = options.split.as_str(),
            reuse = options.reuse,
            steps = ops.len(),
            "opening resource"
        );
        for op in ops {
            match op {
                HostOp::FocusView(view) => host.focus_view(view)?,
                HostOp::OpenSplit(split) => host.open_split(split)?,
                HostOp::OpenTab => host.open_tab()?,
                HostOp::Attach(target) => {
                    host.attach(&target)?;
                }
            }
        }
        Ok(name)
    }

    /// Populates a resource without presenting it and returns its name.
    ///
    /// An existing view that already holds loaded content is left untouched,
    /// keeping any unsaved edits. An existing view that never loaded or whose
    /// load failed is loaded again; otherwise a hidden view is created. Load
    /// failures are contained exactly as for a host read.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoHandler`] when no handler matches, or a host
    /// error when the view cannot be created.
    pub fn preload<H>(
        &mut self,
        host: &mut H,
        path: &str,
        params: &Params,
        fragment: Option<&str>,
    ) -> Result<String, RouterError>
    where
        H: Host + ?Sized,
    {
        let name = self.create_name(path, params, fragment)?;
        let view = match host.find_view(&name) {
            Some(view) if self.state(view).is_some_and(ResourceState::is_loaded) => {
                debug!(target: ROUTER_TARGET, view, name = name.as_str(), "resource already loaded");
                return Ok(name);
            }
            Some(view) => view,
            None => host.create_hidden_view(&name)?,
        };
        debug!(target: ROUTER_TARGET, view, name = name.as_str(), "preloading resource");
        self.on_resource_read(host, view, &name)?;
        Ok(name)
    }

    /// Handles the host's read signal for `view`.
    ///
    /// Returns the state the view ended in. Resolution and handler failures
    /// yield [`ResourceState::LoadFailed`] with the error rendered into the
    /// view rather than an `Err`.
    ///
    /// # Errors
    ///
    /// Returns a host error only when the failure rendering itself fails.
    pub fn on_resource_read<H>(
        &mut self,
        host: &mut H,
        view: ViewId,
        name: &str,
    ) -> Result<ResourceState, RouterError>
    where
        H: Host + ?Sized,
    {
        debug!(target: ROUTER_TARGET, view, name, "loading resource");
        let previous = self.states.insert(view, ResourceState::Loading);
        let write_signal_bound = previous == Some(ResourceState::LoadedWritable);

        let state = match self.populate(host, view, name, write_signal_bound) {
            Ok(state) => state,
            Err(error) => {
                warn!(target: ROUTER_TARGET, view, name, %error, "load failed");
                self.states.insert(view, ResourceState::LoadFailed);
                render_failure(host, view, name, &error)?;
                ResourceState::LoadFailed
            }
        };
        self.states.insert(view, state);
        Ok(state)
    }

    fn populate<H>(
        &self,
        host: &mut H,
        view: ViewId,
        name: &str,
        write_signal_bound: bool,
    ) -> Result<ResourceState, RouterError>
    where
        H: Host + ?Sized,
    {
        let (resource, handler) = self.resolve(view, name)?;
        let content = handler
            .load(&resource)
            .map_err(|source| RouterError::handler(resource.path(), HandlerPhase::Load, source))?;

        host.set_modifiable(view, true)?;
        host.set_lines(view, &content)?;
        host.set_marker(view, resource.path())?;
        host.set_modified(view, false)?;

        if handler.can_save() {
            if !write_signal_bound {
                host.register_write_signal(view, &self.operations.qualified(Operation::Save))?;
            }
            Ok(ResourceState::LoadedWritable)
        } else {
            host.set_modifiable(view, false)?;
            Ok(ResourceState::LoadedReadOnly)
        }
    }

    /// Handles the host's write signal for `view`.
    ///
    /// On failure the view keeps its unsaved changes and stays writable so the
    /// user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotWritable`] when the view did not load
    /// writable or the handler lacks `save`, resolution errors as for a read,
    /// and the handler's error when `save` fails.
    pub fn on_resource_write<H>(
        &mut self,
        host: &mut H,
        view: ViewId,
        name: &str,
    ) -> Result<(), RouterError>
    where
        H: Host + ?Sized,
    {
        let (resource, handler) = self.resolve(view, name)?;
        let writable_state = matches!(
            self.state(view),
            None | Some(ResourceState::LoadedWritable)
        );
        if !writable_state || !handler.can_save() {
            return Err(RouterError::not_writable(resource.path()));
        }

        let lines = host.lines(view)?;
        debug!(
            target: ROUTER_TARGET,
            view,
            name,
            lines = lines.len(),
            "saving resource"
        );
        self.states.insert(view, ResourceState::Saving);
        let outcome = handler.save(&resource, &lines);
        self.states.insert(view, ResourceState::LoadedWritable);

        match outcome {
            Some(Ok(())) => {
                host.set_modified(view, false)?;
                Ok(())
            }
            Some(Err(source)) => {
                warn!(target: ROUTER_TARGET, view, name, error = %source, "save failed");
                Err(RouterError::handler(
                    resource.path(),
                    HandlerPhase::Save,
                    source,
                ))
            }
            None => Err(RouterError::not_writable(resource.path())),
        }
    }

    /// Runs a handler action for the resource currently shown in `view`.
    ///
    /// Actions are independent of the lifecycle and run in any state,
    /// including after a failed load.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoSuchAction`] when the resolved handler lacks
    /// the action, resolution errors, or the action's own error.
    pub fn invoke_action<H>(
        &self,
        host: &H,
        view: ViewId,
        action: &str,
        params: &Params,
    ) -> Result<Value, RouterError>
    where
        H: Host + ?Sized,
    {
        let name = host.view_name(view)?;
        let (resource, handler) = self.resolve(view, &name)?;
        debug!(
            target: ROUTER_TARGET,
            view,
            name = name.as_str(),
            action,
            "invoking action"
        );
        match handler.act(action, &resource, params) {
            Some(result) => result.map_err(|source| {
                RouterError::handler(
                    resource.path(),
                    HandlerPhase::Action(action.to_owned()),
                    source,
                )
            }),
            None => Err(RouterError::no_such_action(resource.path(), action)),
        }
    }

    /// Binds the host's read signal for this router's scheme.
    ///
    /// The binding is made once; later calls return the existing binding.
    ///
    /// # Errors
    ///
    /// Returns a host error when the host refuses the binding.
    pub fn bind_signals<H>(&mut self, host: &mut H) -> Result<SignalBinding, RouterError>
    where
        H: Host + ?Sized,
    {
        if let Some(binding) = &self.binding {
            return Ok(binding.clone());
        }
        let operation = self.operations.qualified(Operation::Load);
        let handle = host.register_read_signal(&self.scheme, &operation)?;
        debug!(
            target: ROUTER_TARGET,
            scheme = self.scheme.as_str(),
            operation = operation.as_str(),
            "bound read signal"
        );
        let binding = SignalBinding {
            scheme: self.scheme.clone(),
            operation,
            handle,
        };
        self.binding = Some(binding.clone());
        Ok(binding)
    }

    /// Defines a host command that opens `path`, returning the command name.
    ///
    /// Without an explicit name the command is named after the ASCII
    /// alphanumeric segments of the scheme and the path in UpperCamelCase,
    /// e.g. `GituiLogGraph` for `gitui` and `log/graph`, or `GitUiStatus` for
    /// `git-ui` and `status`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoHandler`] when `path` cannot be resolved, or a
    /// host error when the command cannot be defined.
    pub fn setup_command<H>(
        &self,
        host: &mut H,
        path: &str,
        command: Option<&str>,
    ) -> Result<String, RouterError>
    where
        H: Host + ?Sized,
    {
        if !self.registry.can_resolve(path) {
            return Err(RouterError::no_handler(path));
        }
        let command = command
            .map(str::to_owned)
            .unwrap_or_else(|| default_command_name(&self.scheme, path));
        host.register_command(
            &command,
            path,
            &self.operations.qualified(Operation::Command),
        )?;
        debug!(
            target: ROUTER_TARGET,
            command = command.as_str(),
            path,
            "defined command"
        );
        Ok(command)
    }

    /// Forgets the lifecycle record of a closed view.
    pub fn on_view_closed(&mut self, view: ViewId) -> Option<ResourceState> {
        self.states.remove(&view)
    }

    fn resolve(
        &self,
        view: ViewId,
        name: &str,
    ) -> Result<(LiveResource, Arc<Handler>), RouterError> {
        let parsed = ResourceName::parse(name)?;
        if parsed.scheme() != self.scheme {
            return Err(RouterError::InvalidScheme {
                expected: self.scheme.clone(),
                found: parsed.scheme().to_owned(),
            });
        }
        let handler = self.registry.resolve(parsed.path())?;
        Ok((LiveResource::new(view, parsed), handler))
    }
}

/// Replaces a view's content with a rendering of `error` and locks it.
fn render_failure<H>(
    host: &mut H,
    view: ViewId,
    name: &str,
    error: &RouterError,
) -> Result<(), RouterError>
where
    H: Host + ?Sized,
{
    host.set_modifiable(view, true)?;
    host.set_lines(view, &render_error(name, error))?;
    host.set_modified(view, false)?;
    host.set_modifiable(view, false)?;
    Ok(())
}

/// Renders a load failure as view content.
#[must_use]
pub fn render_error(name: &str, error: &RouterError) -> Vec<String> {
    let mut lines = vec![format!("Failed to load {name}"), String::new()];
    lines.extend(error.to_string().lines().map(str::to_owned));
    let mut cause = error.source();
    if matches!(error, RouterError::Handler { .. }) {
        // The handler's message is already part of the error's own text.
        cause = cause.and_then(|inner| inner.source());
    }
    while let Some(inner) = cause {
        lines.push(format!("caused by: {inner}"));
        cause = inner.source();
    }
    lines
}

fn default_command_name(scheme: &str, path: &str) -> String {
    [scheme, path]
        .into_iter()
        .flat_map(|part| part.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|segment| !segment.is_empty())
        .map(capitalise)
        .collect()
}

fn capitalise(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
