//! Sibling panels of the remote branches list and pending refreshes

use tracing::debug;

use crate::panel::{BranchesContext, PanelHost, RefreshMode, RefreshScope, SelectionState};

/// Local branches, remotes and the branches pane focus
///
/// Implements [`PanelHost`] for the remote branches panel. Refresh requests
/// are queued here and processed by the app after the handler returns.
#[derive(Debug, Default)]
pub struct Workspace {
    context: BranchesContext,
    local_branches: Vec<String>,
    local_selection: SelectionState,
    checked_out: Option<String>,
    remotes: Vec<String>,
    remote_selection: SelectionState,
    pending: Vec<(RefreshScope, RefreshMode)>,
}

impl Workspace {
    /// An empty workspace showing local branches
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Local branch names
    #[must_use]
    pub fn local_branches(&self) -> &[String] {
        &self.local_branches
    }

    /// Selection in the local branches list
    #[must_use]
    pub const fn local_selection(&self) -> SelectionState {
        self.local_selection
    }

    /// Remote names
    #[must_use]
    pub fn remotes(&self) -> &[String] {
        &self.remotes
    }

    /// Selection in the remotes list
    #[must_use]
    pub const fn remote_selection(&self) -> SelectionState {
        self.remote_selection
    }

    /// Name of the selected remote
    #[must_use]
    pub fn selected_remote(&self) -> Option<&str> {
        self.remote_selection.get(&self.remotes).map(String::as_str)
    }

    /// Replace the local branches and the checked-out branch
    pub fn set_local_branches(&mut self, branches: Vec<String>, checked_out: Option<String>) {
        self.local_branches = branches;
        self.checked_out = checked_out;
        self.local_selection.clamp(self.local_branches.len());
    }

    /// Replace the remotes list
    pub fn set_remotes(&mut self, remotes: Vec<String>) {
        self.remotes = remotes;
        self.remote_selection.clamp(self.remotes.len());
    }

    /// Select the remote called `name`. Returns whether it exists.
    pub fn select_remote(&mut self, name: &str) -> bool {
        match self.remotes.iter().position(|remote| remote == name) {
            Some(index) => {
                self.remote_selection = SelectionState::at(index);
                true
            }
            None => false,
        }
    }

    /// Move the selection of the list shown in the current context
    ///
    /// The remote branches list is owned by its panel and ignored here.
    pub fn move_selection(&mut self, forward: bool) {
        let (selection, len) = match self.context {
            BranchesContext::LocalBranches => {
                (&mut self.local_selection, self.local_branches.len())
            }
            BranchesContext::Remotes => (&mut self.remote_selection, self.remotes.len()),
            BranchesContext::RemoteBranches => return,
        };
        if forward {
            selection.select_next(len);
        } else {
            selection.select_previous(len);
        }
    }

    /// Take the queued refreshes that are due, merged into one scope
    ///
    /// Sync requests are always due; async ones only when `include_async`.
    pub fn take_refreshes(&mut self, include_async: bool) -> Option<RefreshScope> {
        let (due, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, mode)| include_async || *mode == RefreshMode::Sync);
        self.pending = kept;

        due.into_iter()
            .map(|(scope, _)| scope)
            .reduce(|merged, scope| match (merged, scope) {
                (RefreshScope::Only(mut panels), RefreshScope::Only(more)) => {
                    panels.extend(more);
                    RefreshScope::Only(panels)
                }
                _ => RefreshScope::All,
            })
    }

    /// Whether any refresh is queued
    #[must_use]
    pub fn has_pending_refresh(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl PanelHost for Workspace {
    fn current_context(&self) -> BranchesContext {
        self.context
    }

    fn switch_context(&mut self, context: BranchesContext) {
        if self.context != context {
            debug!(from = ?self.context, to = ?context, "Switching branches context");
        }
        self.context = context;
    }

    fn request_refresh(&mut self, scope: RefreshScope, mode: RefreshMode) {
        debug!(?scope, ?mode, "Refresh requested");
        self.pending.push((scope, mode));
    }

    fn checked_out_branch(&self) -> Option<String> {
        self.checked_out.clone()
    }

    fn reset_local_selection(&mut self) {
        self.local_selection.select_first();
        self.local_selection.clamp(self.local_branches.len());
    }
}
