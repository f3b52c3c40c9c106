//! Remote-tracking branch model

use std::fmt;

use tracing::debug;

use super::CommandError;

const REMOTES_PREFIX: &str = "refs/remotes/";

/// A branch mirrored from a remote, identified by `(remote_name, name)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteBranch {
    /// Remote the branch lives on (e.g. "origin")
    pub remote_name: String,
    /// Branch name on that remote (e.g. "feature/login")
    pub name: String,
}

impl RemoteBranch {
    /// Create a remote branch
    #[must_use]
    pub fn new(remote_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
            name: name.into(),
        }
    }

    /// `remote/name`, the form git accepts as a ref
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.remote_name, self.name)
    }
}

impl fmt::Display for RemoteBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remote_name, self.name)
    }
}

/// Parse `git for-each-ref --format=%(refname) refs/remotes` output
///
/// Order is preserved. Symbolic `<remote>/HEAD` entries and refs without a
/// `<remote>/` part are skipped.
///
/// # Errors
///
/// Returns an error if a line is not a remote ref
pub fn parse_remote_branches(output: &str) -> Result<Vec<RemoteBranch>, CommandError> {
    let mut branches = Vec::new();

    for line in output.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let short = line
            .strip_prefix(REMOTES_PREFIX)
            .ok_or_else(|| CommandError::Parse(format!("not a remote ref: {line}")))?;

        // git-svn keeps refs like `refs/remotes/trunk` with no remote part
        let Some((remote, name)) = short.split_once('/') else {
            debug!(reference = line, "Skipping remote ref without a remote name");
            continue;
        };

        if name == "HEAD" || name.is_empty() {
            continue;
        }

        branches.push(RemoteBranch::new(remote, name));
    }

    Ok(branches)
}
