//! In-memory collaborators for panel tests

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::git::{CommandError, CommandSpec, GitBackend, OutputSink, RemoteBranch, ResetMode};

use super::{BranchesContext, BusyIndicator, PanelHost, RefreshMode, RefreshScope};

/// A git call observed by [`RecordingGit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Checkout(String),
    Merge(String),
    Rebase(String),
    DeleteRemoteBranch { remote: String, branch: String },
    SetUpstream { remote: String, branch: String, local: String },
    NewBranch { name: String, base: String },
    Reset { target: String, mode: ResetMode },
    Stream(CommandSpec),
}

/// Git backend that records calls and simulates a remote
#[derive(Debug, Default)]
pub struct RecordingGit {
    branches: RefCell<Vec<RemoteBranch>>,
    checked_out: RefCell<Option<String>>,
    calls: RefCell<Vec<GitCall>>,
    failure: RefCell<Option<String>>,
    stream_failure: RefCell<Option<String>>,
    sinks: RefCell<VecDeque<OutputSink>>,
    busy: RefCell<Option<BusyIndicator>>,
    busy_seen: RefCell<Vec<Option<String>>>,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branches(branches: &[(&str, &str)]) -> Self {
        let git = Self::new();
        *git.branches.borrow_mut() = branches
            .iter()
            .map(|(remote, name)| RemoteBranch::new(*remote, *name))
            .collect();
        git
    }

    pub fn set_checked_out(&self, name: Option<&str>) {
        *self.checked_out.borrow_mut() = name.map(String::from);
    }

    /// Make every mutating call fail with `stderr`
    pub fn fail_with(&self, stderr: &str) {
        *self.failure.borrow_mut() = Some(stderr.to_string());
    }

    pub fn fail_streams(&self, reason: &str) {
        *self.stream_failure.borrow_mut() = Some(reason.to_string());
    }

    /// Record the status of `busy` whenever a blocking mutation runs
    pub fn watch_busy(&self, busy: &BusyIndicator) {
        *self.busy.borrow_mut() = Some(busy.clone());
    }

    /// Busy status observed during each delete or set-upstream call
    pub fn busy_seen(&self) -> Vec<Option<String>> {
        self.busy_seen.borrow().clone()
    }

    fn observe_busy(&self) {
        let status = self.busy.borrow().as_ref().and_then(BusyIndicator::current);
        self.busy_seen.borrow_mut().push(status);
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    /// Calls other than detail streams
    pub fn mutations(&self) -> Vec<GitCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !matches!(call, GitCall::Stream(_)))
            .cloned()
            .collect()
    }

    pub fn streamed(&self) -> Vec<CommandSpec> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GitCall::Stream(spec) => Some(spec.clone()),
                _ => None,
            })
            .collect()
    }

    /// Oldest sink handed out by `stream` and not yet taken
    pub fn take_sink(&self) -> Option<OutputSink> {
        self.sinks.borrow_mut().pop_front()
    }

    fn record(&self, call: GitCall) -> Result<(), CommandError> {
        let command = format!("{call:?}");
        self.calls.borrow_mut().push(call);
        match self.failure.borrow().as_ref() {
            Some(stderr) => Err(CommandError::Failed {
                command,
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl GitBackend for RecordingGit {
    fn fetch_remote_branches(&self) -> Result<Vec<RemoteBranch>, CommandError> {
        Ok(self.branches.borrow().clone())
    }

    fn checked_out_branch(&self) -> Result<Option<String>, CommandError> {
        Ok(self.checked_out.borrow().clone())
    }

    fn local_branches(&self) -> Result<Vec<String>, CommandError> {
        Ok(self.checked_out.borrow().iter().cloned().collect())
    }

    fn remotes(&self) -> Result<Vec<String>, CommandError> {
        let mut remotes: Vec<String> = self
            .branches
            .borrow()
            .iter()
            .map(|branch| branch.remote_name.clone())
            .collect();
        remotes.dedup();
        Ok(remotes)
    }

    fn checkout(&self, reference: &str) -> Result<(), CommandError> {
        self.record(GitCall::Checkout(reference.to_string()))
    }

    fn merge(&self, branch: &str) -> Result<(), CommandError> {
        self.record(GitCall::Merge(branch.to_string()))
    }

    fn rebase(&self, branch: &str) -> Result<(), CommandError> {
        self.record(GitCall::Rebase(branch.to_string()))
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<(), CommandError> {
        self.observe_busy();
        self.record(GitCall::DeleteRemoteBranch {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })?;
        self.branches
            .borrow_mut()
            .retain(|candidate| !(candidate.remote_name == remote && candidate.name == branch));
        Ok(())
    }

    fn set_upstream(&self, remote: &str, branch: &str, local: &str) -> Result<(), CommandError> {
        self.observe_busy();
        self.record(GitCall::SetUpstream {
            remote: remote.to_string(),
            branch: branch.to_string(),
            local: local.to_string(),
        })
    }

    fn new_branch(&self, name: &str, base: &str) -> Result<(), CommandError> {
        self.record(GitCall::NewBranch {
            name: name.to_string(),
            base: base.to_string(),
        })?;
        self.set_checked_out(Some(name));
        Ok(())
    }

    fn reset(&self, target: &str, mode: ResetMode) -> Result<(), CommandError> {
        self.record(GitCall::Reset {
            target: target.to_string(),
            mode,
        })
    }

    fn stream(&self, spec: &CommandSpec, sink: OutputSink) -> Result<(), CommandError> {
        self.calls.borrow_mut().push(GitCall::Stream(spec.clone()));
        if let Some(reason) = self.stream_failure.borrow().as_ref() {
            return Err(CommandError::Spawn {
                command: spec.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, reason.clone()),
            });
        }
        self.sinks.borrow_mut().push_back(sink);
        Ok(())
    }
}

/// Host that records what panels ask of it
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub context: BranchesContext,
    pub checked_out: Option<String>,
    pub refreshes: Vec<(RefreshScope, RefreshMode)>,
    pub switches: Vec<BranchesContext>,
    pub local_selection_resets: usize,
}

impl RecordingHost {
    pub fn focused() -> Self {
        Self {
            context: BranchesContext::RemoteBranches,
            ..Self::default()
        }
    }
}

impl PanelHost for RecordingHost {
    fn current_context(&self) -> BranchesContext {
        self.context
    }

    fn switch_context(&mut self, context: BranchesContext) {
        self.context = context;
        self.switches.push(context);
    }

    fn request_refresh(&mut self, scope: RefreshScope, mode: RefreshMode) {
        self.refreshes.push((scope, mode));
    }

    fn checked_out_branch(&self) -> Option<String> {
        self.checked_out.clone()
    }

    fn reset_local_selection(&mut self) {
        self.local_selection_resets += 1;
    }
}
