//! Host editor collaborator.
//!
//! The router never owns views. Every buffer and window primitive it needs is
//! expressed through the [`Host`] trait so the core can be embedded in any
//! editor that can attach named resources to views and signal when a view
//! needs content or wants to be written back.
//!
//! Hosts deliver signals one at a time; the router relies on that
//! serialisation instead of locking per view.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use crate::error::HostError;
use crate::opener::SplitStyle;

/// Opaque identifier of a host view.
pub type ViewId = u64;

/// Handle returned by the host when the router's read signal is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalHandle(pub u64);

/// View and command primitives provided by the host editor.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Returns the view currently displaying `name`, if any.
    fn find_view(&self, name: &str) -> Option<ViewId>;

    /// Moves focus to an existing view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view no longer exists.
    fn focus_view(&mut self, view: ViewId) -> Result<(), HostError>;

    /// Opens a split window with the given placement and focuses it.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host cannot split.
    fn open_split(&mut self, split: SplitStyle) -> Result<(), HostError>;

    /// Opens a new tab page and focuses it.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host cannot open a tab.
    fn open_tab(&mut self) -> Result<(), HostError>;

    /// Attaches `name` to the focused window.
    ///
    /// The host signals a read for the new view afterwards; attaching never
    /// populates content itself.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view cannot be created.
    fn attach(&mut self, name: &str) -> Result<ViewId, HostError>;

    /// Creates a view for `name` that is not displayed in any window.
    ///
    /// Unlike [`Host::attach`], no read signal follows.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view cannot be created.
    fn create_hidden_view(&mut self, name: &str) -> Result<ViewId, HostError>;

    /// Returns the current name of a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn view_name(&self, view: ViewId) -> Result<String, HostError>;

    /// Returns the content of a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn lines(&self, view: ViewId) -> Result<Vec<String>, HostError>;

    /// Replaces the content of a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist or rejects edits.
    fn set_lines(&mut self, view: ViewId, lines: &[String]) -> Result<(), HostError>;

    /// Sets the view's "unsaved changes" flag.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn set_modified(&mut self, view: ViewId, modified: bool) -> Result<(), HostError>;

    /// Allows or forbids further edits to a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn set_modifiable(&mut self, view: ViewId, modifiable: bool) -> Result<(), HostError>;

    /// Records which registered path produced the view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn set_marker(&mut self, view: ViewId, path: &str) -> Result<(), HostError>;

    /// Routes the host's "read this resource" signal for every name under
    /// `scheme` to the remotely callable `operation`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host refuses the binding.
    fn register_read_signal(
        &mut self,
        scheme: &str,
        operation: &str,
    ) -> Result<SignalHandle, HostError>;

    /// Routes the host's "write this resource" signal for one view to the
    /// remotely callable `operation`.
    ///
    /// The router calls this once per view, when the view first loads
    /// writable; reloads of an already writable view do not register again.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view does not exist.
    fn register_write_signal(&mut self, view: ViewId, operation: &str) -> Result<(), HostError>;

    /// Defines a user command that forwards its arguments and modifiers for
    /// `path` to the remotely callable `operation`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the command cannot be defined.
    fn register_command(
        &mut self,
        command: &str,
        path: &str,
        operation: &str,
    ) -> Result<(), HostError>;
}
