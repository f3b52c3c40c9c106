//! Projection of the remote branch list into display rows

use crate::git::RemoteBranch;

use super::SelectionState;

/// Colour class of a branch, derived from its name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// `feature/...`
    Feature,
    /// `bugfix/...`
    Bugfix,
    /// `hotfix/...`
    Hotfix,
    /// Anything else
    Other,
}

impl BranchKind {
    /// Classify a branch name
    #[must_use]
    pub fn of(name: &str) -> Self {
        match name.split_once('/').map(|(prefix, _)| prefix) {
            Some("feature") => Self::Feature,
            Some("bugfix") => Self::Bugfix,
            Some("hotfix") => Self::Hotfix,
            _ => Self::Other,
        }
    }
}

/// One rendered line of the remote branch list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Branch name without the remote prefix
    pub text: String,
    /// Colour class
    pub kind: BranchKind,
    /// Row holds the selection
    pub selected: bool,
    /// Row is the current diff reference
    pub diffed: bool,
}

/// Build one row per branch, in list order
#[must_use]
pub fn display_rows(
    branches: &[RemoteBranch],
    selection: SelectionState,
    diff_ref: Option<&str>,
) -> Vec<DisplayRow> {
    branches
        .iter()
        .enumerate()
        .map(|(index, branch)| DisplayRow {
            text: branch.name.clone(),
            kind: BranchKind::of(&branch.name),
            selected: selection.selected() == Some(index),
            diffed: diff_ref.is_some_and(|reference| reference == branch.full_name()),
        })
        .collect()
}
