//! Routing of named editor resources to handler callbacks.
//!
//! A plugin owns a scheme such as `gitui` and registers a [`Handler`] for each
//! path it serves. Resources are addressed by names of the form
//! `scheme://path;key=value&key=value#fragment`; the [`name`] module encodes
//! and decodes them.
//!
//! The [`Router`] is driven from two directions:
//!
//! - **Requests** from plugin code: [`Router::open`] presents a resource in a
//!   view according to an [`OpenerOptions`] policy, [`Router::preload`]
//!   populates one without showing it, and [`Router::invoke_action`] runs a
//!   handler action for a view.
//! - **Signals** from the host editor: a read signal for a view of the scheme
//!   arrives at [`Router::on_resource_read`] and a write signal at
//!   [`Router::on_resource_write`].
//!
//! Everything the router needs from the editor goes through the [`Host`]
//! trait. Enabling the `test-support` feature exposes an in-memory host for
//! exercising handlers without an editor.

pub mod error;
pub mod handler;
pub mod host;
pub mod name;
pub mod opener;
pub mod operations;
pub mod registry;
pub mod router;

pub use error::{HandlerError, HandlerPhase, HostError, RouterError};
pub use handler::{Content, Handler, LiveResource};
pub use host::{Host, SignalHandle, ViewId};
pub use name::{ParamValue, Params, ResourceName};
pub use opener::{HostOp, OpenerOptions, SplitStyle};
pub use operations::{Operation, OperationNames};
pub use registry::HandlerRegistry;
pub use router::{ResourceState, Router, SignalBinding};

#[cfg(test)]
mod tests;
