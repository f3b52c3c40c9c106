//! Mutating remote branch actions
//!
//! Every handler is a no-op when nothing is selected. Errors from git abort
//! the action before any refresh is requested.

use tracing::{debug, info};

use crate::git::{CommandError, ResetMode};
use crate::panel::{
    BranchesContext, GateError, MenuItem, PanelContext, PanelId, RefreshMode, RefreshScope,
};

use super::{PendingAction, RemoteBranchesPanel};

impl RemoteBranchesPanel {
    /// Check out the selected branch and switch to local branches
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout fails
    pub fn handle_checkout(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch() else {
            return Ok(());
        };
        let full_name = branch.full_name();

        ctx.git.checkout(&full_name)?;
        info!(branch = %full_name, "Checked out remote branch");

        ctx.host.request_refresh(RefreshScope::All, RefreshMode::Sync);
        ctx.host.switch_context(BranchesContext::LocalBranches);
        Ok(())
    }

    /// Merge the selected branch into the checked-out branch
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD is detached, the branch would merge into
    /// itself, or the merge fails
    pub fn handle_merge(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch() else {
            return Ok(());
        };
        let name = branch.name.clone();
        merge_into_checked_out(ctx, &name)
    }

    /// Ask to delete the selected branch from its remote
    ///
    /// # Errors
    ///
    /// Opening the confirmation never fails; the signature matches the other
    /// handlers.
    pub fn handle_delete(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch().cloned() else {
            return Ok(());
        };

        let message = format!(
            "{} '{}/{}'?",
            ctx.strings.localize("DeleteRemoteBranchMessage"),
            branch.remote_name,
            branch.name
        );
        ignore_conflict(self.gate.open_confirm(
            ctx.strings.localize("DeleteRemoteBranch"),
            message,
            PendingAction::DeleteRemoteBranch(branch),
        ));
        Ok(())
    }

    /// Rebase the checked-out branch onto the selected branch
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD is detached, the branch would rebase onto
    /// itself, or the rebase fails
    pub fn handle_rebase(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch() else {
            return Ok(());
        };
        let name = branch.name.clone();
        rebase_checked_out_onto(ctx, &name)
    }

    /// Ask to make the selected branch the checked-out branch's upstream
    ///
    /// # Errors
    ///
    /// Returns an error if no branch is checked out
    pub fn handle_set_upstream(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch().cloned() else {
            return Ok(());
        };
        let checked_out = require_checked_out(ctx)?;

        let message = ctx.strings.localize_template(
            "SetUpstreamMessage",
            &[
                ("checkedOut", checked_out.as_str()),
                ("selected", branch.full_name().as_str()),
            ],
        );
        ignore_conflict(self.gate.open_confirm(
            ctx.strings.localize("SetUpstreamTitle"),
            message,
            PendingAction::SetUpstream {
                branch,
                checked_out,
            },
        ));
        Ok(())
    }

    /// Open the reset menu for the selected branch
    ///
    /// # Errors
    ///
    /// Opening the menu never fails; the signature matches the other handlers.
    pub fn handle_reset_menu(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch() else {
            return Ok(());
        };
        let target = branch.full_name();

        let items = ResetMode::ALL
            .iter()
            .map(|&mode| MenuItem {
                label: format!(
                    "{} (git reset {} {target})",
                    ctx.strings
                        .localize_template("ResetOption", &[("mode", mode.as_str())]),
                    mode.flag()
                ),
                action: PendingAction::Reset {
                    target: target.clone(),
                    mode,
                },
            })
            .collect();

        let title = format!("{} {target}", ctx.strings.localize("ResetTo"));
        ignore_conflict(self.gate.open_menu(title, items));
        Ok(())
    }

    /// Prompt for the name of a new branch based on the selected branch
    ///
    /// # Errors
    ///
    /// Opening the prompt never fails; the signature matches the other
    /// handlers.
    pub fn handle_new_branch_off(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        let Some(branch) = self.selected_branch().cloned() else {
            return Ok(());
        };
        let full_name = branch.full_name();

        let message = ctx
            .strings
            .localize_template("NewBranchNameBranchOff", &[("branchName", full_name.as_str())]);
        ignore_conflict(self.gate.open_prompt(
            ctx.strings.localize("NewBranch"),
            message,
            full_name,
            PendingAction::NewBranchOff(branch),
        ));
        Ok(())
    }

    /// Go back to the remotes list
    pub fn handle_escape(&mut self, ctx: &mut PanelContext<'_>) {
        ctx.host.switch_context(BranchesContext::Remotes);
    }

    /// Diff against the selected branch, or leave diff mode if it already is
    /// the diff reference
    pub fn handle_toggle_diff(&mut self, ctx: &mut PanelContext<'_>) {
        let Some(branch) = self.selected_branch() else {
            return;
        };
        let full_name = branch.full_name();

        let next = if self.diff_ref() == Some(full_name.as_str()) {
            None
        } else {
            Some(full_name)
        };
        debug!(diff_ref = ?next, "Toggling diff mode");
        self.set_diff_ref(next);
        self.handle_select(ctx);
    }

    /// Affirm the open confirmation and run its action
    ///
    /// # Errors
    ///
    /// Returns an error if the confirmed git operation fails
    pub fn confirm_gate(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        match self.gate.confirm() {
            Some(action) => self.run_pending(action, None, ctx),
            None => Ok(()),
        }
    }

    /// Submit the open prompt and run its action with the trimmed answer
    ///
    /// # Errors
    ///
    /// Returns an error if the answer is rejected or the git operation fails
    pub fn submit_gate(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        match self.gate.submit() {
            Some((action, answer)) => self.run_pending(action, Some(answer), ctx),
            None => Ok(()),
        }
    }

    /// Pick the highlighted menu entry and run its action
    ///
    /// # Errors
    ///
    /// Returns an error if the picked git operation fails
    pub fn pick_gate(&mut self, ctx: &mut PanelContext<'_>) -> Result<(), CommandError> {
        match self.gate.pick() {
            Some(action) => self.run_pending(action, None, ctx),
            None => Ok(()),
        }
    }

    /// Dismiss the open modal without running anything
    pub fn cancel_gate(&mut self) -> bool {
        self.gate.cancel()
    }

    fn run_pending(
        &mut self,
        action: PendingAction,
        answer: Option<String>,
        ctx: &mut PanelContext<'_>,
    ) -> Result<(), CommandError> {
        match action {
            PendingAction::DeleteRemoteBranch(branch) => {
                let _busy = ctx.busy.acquire(ctx.strings.localize("DeletingStatus"));
                ctx.git
                    .delete_remote_branch(&branch.remote_name, &branch.name)?;
                info!(branch = %branch, "Deleted remote branch");

                ctx.host.request_refresh(
                    RefreshScope::only([PanelId::Branches, PanelId::Remotes]),
                    RefreshMode::Sync,
                );
            }
            PendingAction::SetUpstream {
                branch,
                checked_out,
            } => {
                let _busy = ctx
                    .busy
                    .acquire(ctx.strings.localize("SettingUpstreamStatus"));
                ctx.git
                    .set_upstream(&branch.remote_name, &branch.name, &checked_out)?;
                info!(branch = %branch, local = %checked_out, "Set upstream");

                ctx.host.request_refresh(
                    RefreshScope::only([PanelId::Branches, PanelId::Remotes]),
                    RefreshMode::Sync,
                );
            }
            PendingAction::NewBranchOff(base) => {
                let name = answer.unwrap_or_default();
                if name.is_empty() {
                    return Err(CommandError::Rejected(
                        ctx.strings.localize("BranchNameEmpty"),
                    ));
                }

                ctx.git.new_branch(&name, &base.full_name())?;
                info!(branch = %name, base = %base, "Created branch off remote");

                ctx.host.reset_local_selection();
                ctx.host.switch_context(BranchesContext::LocalBranches);
                ctx.host.request_refresh(RefreshScope::All, RefreshMode::Async);
            }
            PendingAction::Reset { target, mode } => {
                ctx.git.reset(&target, mode)?;
                info!(target = %target, mode = mode.as_str(), "Reset to remote branch");

                ctx.host.request_refresh(RefreshScope::All, RefreshMode::Sync);
            }
        }
        Ok(())
    }
}

fn merge_into_checked_out(ctx: &mut PanelContext<'_>, branch: &str) -> Result<(), CommandError> {
    let checked_out = require_checked_out(ctx)?;
    if checked_out == branch {
        return Err(CommandError::Rejected(
            ctx.strings.localize("CantMergeBranchIntoItself"),
        ));
    }

    ctx.git.merge(branch)?;
    info!(branch, into = %checked_out, "Merged branch");

    ctx.host.request_refresh(RefreshScope::All, RefreshMode::Sync);
    Ok(())
}

fn rebase_checked_out_onto(ctx: &mut PanelContext<'_>, branch: &str) -> Result<(), CommandError> {
    let checked_out = require_checked_out(ctx)?;
    if checked_out == branch {
        return Err(CommandError::Rejected(
            ctx.strings.localize("CantRebaseOntoSelf"),
        ));
    }

    ctx.git.rebase(branch)?;
    info!(branch = %checked_out, onto = branch, "Rebased branch");

    ctx.host.request_refresh(RefreshScope::All, RefreshMode::Sync);
    Ok(())
}

fn require_checked_out(ctx: &PanelContext<'_>) -> Result<String, CommandError> {
    ctx.host
        .checked_out_branch()
        .ok_or_else(|| CommandError::Rejected(ctx.strings.localize("NoCheckedOutBranch")))
}

fn ignore_conflict(result: Result<(), GateError>) {
    if let Err(err) = result {
        debug!(error = %err, "Ignoring gate request");
    }
}
