//! In-memory [`Host`] used by tests and by embedders exercising handlers
//! without an editor.

use std::collections::BTreeMap;

use crate::error::HostError;
use crate::opener::{HostOp, SplitStyle};

use super::{Host, SignalHandle, ViewId};

/// State of a single in-memory view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryView {
    /// Name attached to the view.
    pub name: String,
    /// Current content.
    pub lines: Vec<String>,
    /// "Unsaved changes" flag.
    pub modified: bool,
    /// Whether edits are allowed.
    pub modifiable: bool,
    /// Path recorded by the router on load.
    pub marker: Option<String>,
    /// Operation wired to the view's write signal.
    pub write_signal: Option<String>,
    /// Whether the view is shown in a window.
    pub hidden: bool,
}

/// User command defined through [`Host::register_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCommand {
    /// Command name.
    pub name: String,
    /// Path the command opens.
    pub path: String,
    /// Operation the command forwards to.
    pub operation: String,
}

/// A host that keeps views in memory and records window operations.
#[derive(Debug, Default)]
pub struct MemoryHost {
    views: BTreeMap<ViewId, MemoryView>,
    focused: Option<ViewId>,
    next_view: ViewId,
    window_ops: Vec<HostOp>,
    read_signals: Vec<(String, String)>,
    commands: Vec<MemoryCommand>,
    failing: Option<&'static str>,
}

impl MemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of the named primitive fail.
    pub fn fail_on(&mut self, primitive: &'static str) {
        self.failing = Some(primitive);
    }

    /// Returns a view by id.
    #[must_use]
    pub fn view(&self, view: ViewId) -> Option<&MemoryView> {
        self.views.get(&view)
    }

    /// Returns the number of views.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Returns the focused view.
    #[must_use]
    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// Returns the window operations performed so far.
    #[must_use]
    pub fn window_ops(&self) -> &[HostOp] {
        &self.window_ops
    }

    /// Returns the `(scheme, operation)` pairs bound as read signals.
    #[must_use]
    pub fn read_signals(&self) -> &[(String, String)] {
        &self.read_signals
    }

    /// Returns the user commands defined so far.
    #[must_use]
    pub fn commands(&self) -> &[MemoryCommand] {
        &self.commands
    }

    /// Simulates the user editing a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view is missing or not modifiable.
    pub fn user_edit(&mut self, view: ViewId, lines: &[&str]) -> Result<(), HostError> {
        let state = self.view_mut("user_edit", view)?;
        if !state.modifiable {
            return Err(HostError::new("user_edit", "view is not modifiable"));
        }
        state.lines = lines.iter().map(|line| (*line).to_owned()).collect();
        state.modified = true;
        Ok(())
    }

    /// Simulates the user renaming a view.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the view is missing.
    pub fn rename(&mut self, view: ViewId, name: &str) -> Result<(), HostError> {
        self.view_mut("rename", view)?.name = name.to_owned();
        Ok(())
    }

    /// Closes a view.
    pub fn close(&mut self, view: ViewId) {
        self.views.remove(&view);
        if self.focused == Some(view) {
            self.focused = None;
        }
    }

    fn check(&self, primitive: &'static str) -> Result<(), HostError> {
        if self.failing == Some(primitive) {
            return Err(HostError::new(primitive, "injected failure"));
        }
        Ok(())
    }

    fn view_ref(&self, primitive: &'static str, view: ViewId) -> Result<&MemoryView, HostError> {
        self.check(primitive)?;
        self.views
            .get(&view)
            .ok_or_else(|| HostError::new(primitive, format!("no view {view}")))
    }

    fn view_mut(
        &mut self,
        primitive: &'static str,
        view: ViewId,
    ) -> Result<&mut MemoryView, HostError> {
        self.check(primitive)?;
        self.views
            .get_mut(&view)
            .ok_or_else(|| HostError::new(primitive, format!("no view {view}")))
    }

    fn create_view(&mut self, name: &str, hidden: bool) -> ViewId {
        self.next_view += 1;
        let id = self.next_view;
        self.views.insert(
            id,
            MemoryView {
                name: name.to_owned(),
                modifiable: true,
                hidden,
                ..MemoryView::default()
            },
        );
        id
    }
}

impl Host for MemoryHost {
    fn find_view(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .find(|(_, view)| view.name == name)
            .map(|(id, _)| *id)
    }

    fn focus_view(&mut self, view: ViewId) -> Result<(), HostError> {
        let state = self.view_mut("focus_view", view)?;
        state.hidden = false;
        self.focused = Some(view);
        self.window_ops.push(HostOp::FocusView(view));
        Ok(())
    }

    fn open_split(&mut self, split: SplitStyle) -> Result<(), HostError> {
        self.check("open_split")?;
        self.window_ops.push(HostOp::OpenSplit(split));
        Ok(())
    }

    fn open_tab(&mut self) -> Result<(), HostError> {
        self.check("open_tab")?;
        self.window_ops.push(HostOp::OpenTab);
        Ok(())
    }

    fn attach(&mut self, name: &str) -> Result<ViewId, HostError> {
        self.check("attach")?;
        let id = match self.find_view(name) {
            Some(id) => {
                if let Some(view) = self.views.get_mut(&id) {
                    view.hidden = false;
                }
                id
            }
            None => self.create_view(name, false),
        };
        self.focused = Some(id);
        self.window_ops.push(HostOp::Attach(name.to_owned()));
        Ok(id)
    }

    fn create_hidden_view(&mut self, name: &str) -> Result<ViewId, HostError> {
        self.check("create_hidden_view")?;
        Ok(self.create_view(name, true))
    }

    fn view_name(&self, view: ViewId) -> Result<String, HostError> {
        Ok(self.view_ref("view_name", view)?.name.clone())
    }

    fn lines(&self, view: ViewId) -> Result<Vec<String>, HostError> {
        Ok(self.view_ref("lines", view)?.lines.clone())
    }

    fn set_lines(&mut self, view: ViewId, lines: &[String]) -> Result<(), HostError> {
        let state = self.view_mut("set_lines", view)?;
        if !state.modifiable {
            return Err(HostError::new("set_lines", "view is not modifiable"));
        }
        state.lines = lines.to_vec();
        Ok(())
    }

    fn set_modified(&mut self, view: ViewId, modified: bool) -> Result<(), HostError> {
        self.view_mut("set_modified", view)?.modified = modified;
        Ok(())
    }

    fn set_modifiable(&mut self, view: ViewId, modifiable: bool) -> Result<(), HostError> {
        self.view_mut("set_modifiable", view)?.modifiable = modifiable;
        Ok(())
    }

    fn set_marker(&mut self, view: ViewId, path: &str) -> Result<(), HostError> {
        self.view_mut("set_marker", view)?.marker = Some(path.to_owned());
        Ok(())
    }

    fn register_read_signal(
        &mut self,
        scheme: &str,
        operation: &str,
    ) -> Result<SignalHandle, HostError> {
        self.check("register_read_signal")?;
        self.read_signals
            .push((scheme.to_owned(), operation.to_owned()));
        Ok(SignalHandle(self.read_signals.len() as u64))
    }

    fn register_write_signal(&mut self, view: ViewId, operation: &str) -> Result<(), HostError> {
        self.view_mut("register_write_signal", view)?.write_signal = Some(operation.to_owned());
        Ok(())
    }

    fn register_command(
        &mut self,
        command: &str,
        path: &str,
        operation: &str,
    ) -> Result<(), HostError> {
        self.check("register_command")?;
        self.commands.retain(|existing| existing.name != command);
        self.commands.push(MemoryCommand {
            name: command.to_owned(),
            path: path.to_owned(),
            operation: operation.to_owned(),
        });
        Ok(())
    }
}
