//! Remote branches panel: list, selection, detail rendering and actions

mod actions;

use tracing::{debug, error};

use crate::command::expand_template;
use crate::git::{CommandError, CommandSpec, RemoteBranch, ResetMode};

use super::{
    BranchesContext, DetailScheduler, DisplayRow, Gate, PanelContext, SelectionState, display_rows,
};

/// Continuation stored in the panel's gate until the user resolves it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete the branch on its remote
    DeleteRemoteBranch(RemoteBranch),
    /// Make `branch` the upstream of `checked_out`
    SetUpstream {
        /// New upstream
        branch: RemoteBranch,
        /// Local branch whose upstream changes
        checked_out: String,
    },
    /// Create a branch off `base` named by the prompt answer
    NewBranchOff(RemoteBranch),
    /// Reset the checked-out branch to `target`
    Reset {
        /// Ref to reset to
        target: String,
        /// Reset flavour
        mode: ResetMode,
    },
}

/// Controller for the remote branches list
///
/// Owns the branch list, the selection, the modal gate and the detail task.
/// Handlers receive everything else through a [`PanelContext`].
#[derive(Debug)]
pub struct RemoteBranchesPanel {
    branches: Vec<RemoteBranch>,
    selection: SelectionState,
    rows: Vec<DisplayRow>,
    diff_ref: Option<String>,
    gate: Gate<PendingAction>,
    detail: DetailScheduler,
    branch_log_cmd: String,
}

impl RemoteBranchesPanel {
    /// Create an empty panel rendering branch graphs with `branch_log_cmd`
    ///
    /// `{{branchName}}` in the template is replaced by the selected branch's
    /// full name.
    #[must_use]
    pub fn new(branch_log_cmd: impl Into<String>) -> Self {
        Self {
            branches: Vec::new(),
            selection: SelectionState::new(),
            rows: Vec::new(),
            diff_ref: None,
            gate: Gate::Closed,
            detail: DetailScheduler::new(),
            branch_log_cmd: branch_log_cmd.into(),
        }
    }

    /// Branches in display order
    #[must_use]
    pub fn branches(&self) -> &[RemoteBranch] {
        &self.branches
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Rows from the last render
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// The open (or closed) modal
    #[must_use]
    pub const fn gate(&self) -> &Gate<PendingAction> {
        &self.gate
    }

    /// Mutable gate access for text editing and menu navigation
    pub const fn gate_mut(&mut self) -> &mut Gate<PendingAction> {
        &mut self.gate
    }

    /// Whether a modal owned by this panel is showing
    #[must_use]
    pub const fn is_popup_active(&self) -> bool {
        self.gate.is_open()
    }

    /// The detail scheduler
    #[must_use]
    pub const fn detail(&self) -> &DetailScheduler {
        &self.detail
    }

    /// Mutable detail scheduler, for polling streamed output
    pub const fn detail_mut(&mut self) -> &mut DetailScheduler {
        &mut self.detail
    }

    /// Ref the panel diffs against, when in diff mode
    #[must_use]
    pub fn diff_ref(&self) -> Option<&str> {
        self.diff_ref.as_deref()
    }

    /// Enter diff mode against `reference`, or leave it with `None`
    pub fn set_diff_ref(&mut self, reference: Option<String>) {
        self.diff_ref = reference;
        self.rebuild_rows();
    }

    /// The selected branch, `None` when nothing is selected
    #[must_use]
    pub fn selected_branch(&self) -> Option<&RemoteBranch> {
        self.selection.get(&self.branches)
    }

    /// Replace the branch list wholesale and clamp the selection
    pub fn set_branches(&mut self, branches: Vec<RemoteBranch>) {
        self.branches = branches;
        self.selection.clamp(self.branches.len());
        self.rebuild_rows();
    }

    /// Move the selection back to the first branch
    pub fn reset_selection(&mut self) {
        self.selection.select_first();
        self.selection.clamp(self.branches.len());
        self.rebuild_rows();
    }

    /// Clamp, redraw the rows and, when focused, refresh the detail view
    pub fn render_with_selection(&mut self, ctx: &mut PanelContext<'_>) {
        self.selection.clamp(self.branches.len());
        self.rebuild_rows();
        if ctx.host.current_context() == BranchesContext::RemoteBranches {
            self.handle_select(ctx);
        }
    }

    /// Refresh the detail view for the current selection
    ///
    /// Does nothing while a modal is open. Detail failures are logged by the
    /// scheduler and never surfaced.
    pub fn handle_select(&mut self, ctx: &mut PanelContext<'_>) {
        if self.is_popup_active() {
            debug!("Popup active, skipping remote branch select");
            return;
        }

        self.detail
            .set_title(ctx.strings.localize("RemoteBranchTitle"));

        let Some(branch) = self.selected_branch() else {
            self.detail
                .show_static(&ctx.strings.localize("NoBranchesThisRemote"));
            return;
        };
        let full_name = branch.full_name();

        let spec = match self.diff_ref.as_deref() {
            Some(diff_ref) => Ok(diff_command(diff_ref, &full_name)),
            None => self.branch_graph_command(&full_name),
        };

        match spec {
            Ok(spec) => {
                self.detail.start(ctx.git, &spec);
            }
            Err(err) => {
                error!(error = %err, "Invalid branch log command");
                self.detail.show_static(&err.to_string());
            }
        }
    }

    /// Move the selection down and refresh the detail view
    pub fn select_next(&mut self, ctx: &mut PanelContext<'_>) {
        if self.selection.select_next(self.branches.len()) {
            self.rebuild_rows();
            self.handle_select(ctx);
        }
    }

    /// Move the selection up and refresh the detail view
    pub fn select_previous(&mut self, ctx: &mut PanelContext<'_>) {
        if self.selection.select_previous(self.branches.len()) {
            self.rebuild_rows();
            self.handle_select(ctx);
        }
    }

    /// Command rendering the log graph of `full_name`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured template cannot be parsed
    pub fn branch_graph_command(&self, full_name: &str) -> Result<CommandSpec, CommandError> {
        expand_template(&self.branch_log_cmd, &[("branchName", full_name)])
    }

    fn rebuild_rows(&mut self) {
        self.rows = display_rows(&self.branches, self.selection, self.diff_ref.as_deref());
    }
}

fn diff_command(diff_ref: &str, full_name: &str) -> CommandSpec {
    CommandSpec::git(["diff", "--color=always", diff_ref, full_name])
}
