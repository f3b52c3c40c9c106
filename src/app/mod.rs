//! Application state and logic

mod event;
mod handler;
mod workspace;

pub use event::{Event, Handler};
pub use workspace::Workspace;

use tracing::{debug, warn};

use crate::config::Config;
use crate::git::{CommandError, GitBackend, GitCli};
use crate::i18n::Translations;
use crate::panel::{
    BranchesContext, BusyIndicator, PanelContext, PanelHost, PanelId, RefreshScope,
    RemoteBranchesPanel,
};

/// Main application state
#[derive(Debug)]
pub struct App<G: GitBackend = GitCli> {
    /// Application configuration
    pub config: Config,
    git: G,
    strings: Translations,
    busy: BusyIndicator,
    workspace: Workspace,
    remote_branches: RemoteBranchesPanel,
    error: Option<String>,
    should_quit: bool,
}

impl<G: GitBackend> App<G> {
    /// Create an application over `git`; call [`App::load`] to fill the lists
    #[must_use]
    pub fn new(config: Config, git: G) -> Self {
        let strings = config.translations();
        let remote_branches = RemoteBranchesPanel::new(config.branch_log_cmd.clone());
        Self {
            config,
            git,
            strings,
            busy: BusyIndicator::new(),
            workspace: Workspace::new(),
            remote_branches,
            error: None,
            should_quit: false,
        }
    }

    /// The git backend
    #[must_use]
    pub const fn git(&self) -> &G {
        &self.git
    }

    /// User-facing strings
    #[must_use]
    pub const fn strings(&self) -> &Translations {
        &self.strings
    }

    /// Waiting-status indicator
    #[must_use]
    pub const fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// Local branches, remotes and focus
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The remote branches panel
    #[must_use]
    pub const fn remote_branches(&self) -> &RemoteBranchesPanel {
        &self.remote_branches
    }

    /// What the branches pane is showing
    #[must_use]
    pub fn context(&self) -> BranchesContext {
        self.workspace.current_context()
    }

    /// Error waiting to be dismissed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the user asked to quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Load every list from git
    ///
    /// # Errors
    ///
    /// Returns an error if any git query fails
    pub fn load(&mut self) -> Result<(), CommandError> {
        self.refresh(&RefreshScope::All)
    }

    /// Show the branches of `remote` and focus them
    ///
    /// # Errors
    ///
    /// Returns an error if `remote` does not exist or the branch list cannot
    /// be fetched
    pub fn open_remote(&mut self, remote: &str) -> Result<(), CommandError> {
        if !self.workspace.select_remote(remote) {
            return Err(CommandError::Rejected(format!("No remote named '{remote}'")));
        }
        debug!(remote, "Opening remote");

        self.workspace
            .switch_context(BranchesContext::RemoteBranches);
        self.reload_remote_branches()?;
        self.remote_branches.reset_selection();
        self.with_panel(|panel, ctx| panel.render_with_selection(ctx));
        Ok(())
    }

    /// Reload the panels covered by `scope`
    ///
    /// # Errors
    ///
    /// Returns an error if a git query fails
    pub fn refresh(&mut self, scope: &RefreshScope) -> Result<(), CommandError> {
        debug!(?scope, "Refreshing");

        if scope.includes(PanelId::Branches) {
            let branches = self.git.local_branches()?;
            let checked_out = self.git.checked_out_branch()?;
            self.workspace.set_local_branches(branches, checked_out);
        }

        if scope.includes(PanelId::Remotes) {
            let remotes = self.git.remotes()?;
            self.workspace.set_remotes(remotes);
            self.reload_remote_branches()?;
            self.with_panel(|panel, ctx| panel.render_with_selection(ctx));
        }

        Ok(())
    }

    /// Run queued refreshes; async ones only when `include_async`
    pub fn process_refreshes(&mut self, include_async: bool) {
        if let Some(scope) = self.workspace.take_refreshes(include_async) {
            let result = self.refresh(&scope);
            self.report(result);
        }
    }

    /// Periodic work: apply streamed detail output and deferred refreshes
    pub fn tick(&mut self) {
        self.remote_branches.detail_mut().poll();
        self.process_refreshes(true);
    }

    fn reload_remote_branches(&mut self) -> Result<(), CommandError> {
        let remote = self.workspace.selected_remote().map(str::to_owned);
        let branches = self
            .git
            .fetch_remote_branches()?
            .into_iter()
            .filter(|branch| remote.as_deref() == Some(branch.remote_name.as_str()))
            .collect();
        self.remote_branches.set_branches(branches);
        Ok(())
    }

    fn with_panel<R>(
        &mut self,
        f: impl FnOnce(&mut RemoteBranchesPanel, &mut PanelContext<'_>) -> R,
    ) -> R {
        let mut ctx = PanelContext {
            git: &self.git,
            host: &mut self.workspace,
            strings: &self.strings,
            busy: &self.busy,
        };
        f(&mut self.remote_branches, &mut ctx)
    }

    fn report(&mut self, result: Result<(), CommandError>) {
        if let Err(err) = result {
            warn!(error = %err, "Action failed");
            self.error = Some(err.to_string());
        }
    }
}
