//! Panel controllers and the seams they talk to the rest of the app through

mod busy;
mod detail;
mod gate;
mod remote_branches;
mod render;
mod selection;
mod text_input;

#[cfg(test)]
pub(crate) mod testing;

pub use busy::{BusyGuard, BusyIndicator};
pub use detail::{DetailScheduler, DetailTask, DetailView, TaskState};
pub use gate::{Gate, GateError, MenuItem};
pub use remote_branches::{PendingAction, RemoteBranchesPanel};
pub use render::{BranchKind, DisplayRow, display_rows};
pub use selection::SelectionState;
pub use text_input::TextInput;

use std::collections::BTreeSet;

use crate::git::GitBackend;
use crate::i18n::Translations;

/// Panels that can be asked to reload their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    /// Local branches and the checked-out branch
    Branches,
    /// Remotes and their branches
    Remotes,
    /// Commit log
    Commits,
    /// Working tree files
    Files,
}

/// Which panels a refresh covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshScope {
    /// Every panel
    All,
    /// Only the listed panels
    Only(BTreeSet<PanelId>),
}

impl RefreshScope {
    /// Scope covering exactly `panels`
    pub fn only(panels: impl IntoIterator<Item = PanelId>) -> Self {
        Self::Only(panels.into_iter().collect())
    }

    /// Whether `panel` is covered
    #[must_use]
    pub fn includes(&self, panel: PanelId) -> bool {
        match self {
            Self::All => true,
            Self::Only(panels) => panels.contains(&panel),
        }
    }
}

/// When a requested refresh runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Before the next frame is drawn
    Sync,
    /// On a later loop tick, without holding up the current handler
    Async,
}

/// What the branches pane is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BranchesContext {
    /// Local branches
    #[default]
    LocalBranches,
    /// Configured remotes
    Remotes,
    /// Branches of the selected remote
    RemoteBranches,
}

/// The application as seen from a panel controller
///
/// Panels never reload other panels' data or own focus; they ask the host.
pub trait PanelHost {
    /// Context currently shown in the branches pane
    fn current_context(&self) -> BranchesContext;

    /// Show `context` in the branches pane
    fn switch_context(&mut self, context: BranchesContext);

    /// Ask for `scope` to be reloaded
    fn request_refresh(&mut self, scope: RefreshScope, mode: RefreshMode);

    /// Name of the checked-out branch, owned by the local branches panel
    fn checked_out_branch(&self) -> Option<String>;

    /// Move the local branches selection back to the first row
    fn reset_local_selection(&mut self);
}

/// Everything a panel handler needs besides the panel itself
pub struct PanelContext<'a> {
    /// Git capability
    pub git: &'a dyn GitBackend,
    /// Owning application
    pub host: &'a mut dyn PanelHost,
    /// User-facing strings
    pub strings: &'a Translations,
    /// Waiting-status indicator
    pub busy: &'a BusyIndicator,
}

impl std::fmt::Debug for PanelContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_scope_includes() {
        let scope = RefreshScope::only([PanelId::Branches, PanelId::Remotes]);
        assert!(scope.includes(PanelId::Branches));
        assert!(scope.includes(PanelId::Remotes));
        assert!(!scope.includes(PanelId::Commits));
        assert!(RefreshScope::All.includes(PanelId::Files));
    }
}
