//! Key and action dispatch

use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::config::Action;
use crate::git::{CommandError, GitBackend};
use crate::panel::{BranchesContext, Gate, PanelHost, RemoteBranchesPanel};

use super::App;

/// How a key press resolves an open gate
enum GateKey {
    Resolve,
    Cancel,
    Edit,
    Ignore,
}

impl<G: GitBackend> App<G> {
    /// Handle a key press
    ///
    /// An error modal swallows the next key. An open gate gets every key
    /// until it closes; otherwise the key is looked up in the bindings.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.error.take().is_some() {
            debug!("Dismissed error modal");
            return;
        }

        if self.remote_branches.is_popup_active() {
            self.handle_gate_key(code, modifiers);
        } else if let Some(action) = self.config.keys.get_action(code, modifiers) {
            self.handle_action(action);
        }
    }

    /// Dispatch a bound action for the current context
    pub fn handle_action(&mut self, action: Action) {
        let context = self.context();
        debug!(?action, ?context, "Handling action");

        let result = match (action, context) {
            (Action::Quit, _) => {
                self.should_quit = true;
                Ok(())
            }
            (Action::NextItem, BranchesContext::RemoteBranches) => {
                self.with_panel(|panel, ctx| panel.select_next(ctx));
                Ok(())
            }
            (Action::PrevItem, BranchesContext::RemoteBranches) => {
                self.with_panel(|panel, ctx| panel.select_previous(ctx));
                Ok(())
            }
            (Action::NextItem, _) => {
                self.workspace.move_selection(true);
                Ok(())
            }
            (Action::PrevItem, _) => {
                self.workspace.move_selection(false);
                Ok(())
            }
            (Action::Open, BranchesContext::Remotes) => {
                match self.workspace.selected_remote().map(str::to_owned) {
                    Some(remote) => self.open_remote(&remote),
                    None => Ok(()),
                }
            }
            (Action::SwitchContext, BranchesContext::LocalBranches) => {
                self.workspace.switch_context(BranchesContext::Remotes);
                Ok(())
            }
            (Action::SwitchContext, _) => {
                self.workspace
                    .switch_context(BranchesContext::LocalBranches);
                Ok(())
            }
            (Action::Escape, BranchesContext::RemoteBranches) => {
                self.with_panel(|panel, ctx| panel.handle_escape(ctx));
                Ok(())
            }
            (Action::ToggleDiff, BranchesContext::RemoteBranches) => {
                self.with_panel(|panel, ctx| panel.handle_toggle_diff(ctx));
                Ok(())
            }
            (action, BranchesContext::RemoteBranches) => match branch_handler(action) {
                Some(handler) => self.with_panel(handler),
                None => Ok(()),
            },
            _ => Ok(()),
        };

        self.report(result);
        self.process_refreshes(false);
    }

    fn handle_gate_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let key = match self.remote_branches.gate() {
            Gate::Closed => GateKey::Ignore,
            Gate::Confirm { .. } => match code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => GateKey::Resolve,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => GateKey::Cancel,
                _ => GateKey::Ignore,
            },
            Gate::Prompt { .. } => match code {
                KeyCode::Enter => GateKey::Resolve,
                KeyCode::Esc => GateKey::Cancel,
                _ => GateKey::Edit,
            },
            Gate::Menu { .. } => match code {
                KeyCode::Enter => GateKey::Resolve,
                KeyCode::Esc | KeyCode::Char('q') => GateKey::Cancel,
                _ => GateKey::Edit,
            },
        };

        match key {
            GateKey::Resolve => {
                let result = match self.remote_branches.gate() {
                    Gate::Confirm { .. } => self.with_panel(RemoteBranchesPanel::confirm_gate),
                    Gate::Prompt { .. } => self.with_panel(RemoteBranchesPanel::submit_gate),
                    Gate::Menu { .. } => self.with_panel(RemoteBranchesPanel::pick_gate),
                    Gate::Closed => Ok(()),
                };
                let failed = result.is_err();
                self.report(result);
                self.process_refreshes(false);
                if failed {
                    self.with_panel(|panel, ctx| panel.render_with_selection(ctx));
                }
            }
            GateKey::Cancel => {
                if self.remote_branches.cancel_gate() {
                    debug!("Gate cancelled");
                }
                self.with_panel(|panel, ctx| panel.render_with_selection(ctx));
            }
            GateKey::Edit => self.edit_gate(code, modifiers),
            GateKey::Ignore => {}
        }
    }

    fn edit_gate(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let gate = self.remote_branches.gate_mut();

        if let Some(input) = gate.input_mut() {
            match code {
                KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                    input.delete_word();
                }
                KeyCode::Char(c) => input.insert_char(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.cursor_left(),
                KeyCode::Right => input.cursor_right(),
                KeyCode::Home => input.cursor_home(),
                KeyCode::End => input.cursor_end(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('j') | KeyCode::Down => gate.menu_next(),
            KeyCode::Char('k') | KeyCode::Up => gate.menu_previous(),
            _ => {}
        }
    }
}

type BranchHandler = fn(
    &mut RemoteBranchesPanel,
    &mut crate::panel::PanelContext<'_>,
) -> Result<(), CommandError>;

fn branch_handler(action: Action) -> Option<BranchHandler> {
    match action {
        Action::Checkout => Some(RemoteBranchesPanel::handle_checkout),
        Action::Merge => Some(RemoteBranchesPanel::handle_merge),
        Action::Delete => Some(RemoteBranchesPanel::handle_delete),
        Action::Rebase => Some(RemoteBranchesPanel::handle_rebase),
        Action::SetUpstream => Some(RemoteBranchesPanel::handle_set_upstream),
        Action::ResetMenu => Some(RemoteBranchesPanel::handle_reset_menu),
        Action::NewBranch => Some(RemoteBranchesPanel::handle_new_branch_off),
        _ => None,
    }
}
