//! User-facing strings

use std::collections::HashMap;

const ENGLISH: &[(&str, &str)] = &[
    ("RemoteBranchTitle", "Remote Branch"),
    ("NoBranchesThisRemote", "No branches for this remote"),
    ("DeleteRemoteBranch", "Delete Remote Branch"),
    (
        "DeleteRemoteBranchMessage",
        "Are you sure you want to delete remote branch",
    ),
    ("DeletingStatus", "deleting"),
    ("SetUpstreamTitle", "Set upstream branch"),
    (
        "SetUpstreamMessage",
        "Are you sure you want to set the upstream branch of '{{checkedOut}}' to '{{selected}}'",
    ),
    ("SettingUpstreamStatus", "setting upstream"),
    ("NewBranch", "New Branch"),
    (
        "NewBranchNameBranchOff",
        "New branch name (branch is off of '{{branchName}}')",
    ),
    ("BranchNameEmpty", "Branch name cannot be empty"),
    ("ResetTo", "reset to"),
    ("ResetOption", "{{mode}} reset"),
    ("CantMergeBranchIntoItself", "You cannot merge a branch into itself"),
    ("CantRebaseOntoSelf", "You cannot rebase a branch onto itself"),
    ("NoCheckedOutBranch", "No branch is checked out (detached HEAD)"),
    ("LocalBranchesTitle", "Local Branches"),
    ("RemotesTitle", "Remotes"),
    ("RemoteBranchesTitle", "Remote Branches"),
    ("ErrorTitle", "Error"),
];

/// Localized string table
///
/// Lookups never fail: unknown keys render as the key itself so a missing
/// entry is visible rather than silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

impl Translations {
    /// The built-in English table
    #[must_use]
    pub fn english() -> Self {
        Self {
            entries: ENGLISH
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    /// Replace entries with user-provided overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }

    /// Look up a plain string
    #[must_use]
    pub fn localize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up a template and replace its `{{field}}` placeholders
    #[must_use]
    pub fn localize_template(&self, key: &str, fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .fold(self.localize(key), |text, (field, value)| {
                text.replace(&format!("{{{{{field}}}}}"), value)
            })
    }
}
