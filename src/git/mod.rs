//! Git operations module

mod cli;
mod remote_branch;
mod stream;

pub use cli::Cli as GitCli;
pub use remote_branch::{RemoteBranch, parse_remote_branches};
pub use stream::{OutputSink, StreamEvent, StreamMessage};

use anyhow::{Context, Result};
use git2::Repository;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An argv description of an external command
///
/// No shell semantics: `program` is executed directly with `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to run
    pub program: String,
    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a `git` invocation from its arguments
    #[must_use]
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "git".to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a spec from a full argv vector (program first)
    ///
    /// Returns `None` when `argv` is empty.
    #[must_use]
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Failure of an external command, or a request rejected before running one
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// The process ran and exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        /// Command line that ran
        command: String,
        /// Exit status description
        status: String,
        /// Trimmed standard error
        stderr: String,
    },
    /// Command output could not be understood
    #[error("unexpected git output: {0}")]
    Parse(String),
    /// The request was refused before anything ran
    #[error("{0}")]
    Rejected(String),
}

/// Reset flavours offered by the reset menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetMode {
    /// Keep index and working tree
    Soft,
    /// Keep working tree, reset index
    Mixed,
    /// Discard index and working tree changes
    Hard,
}

impl ResetMode {
    /// All modes in menu order
    pub const ALL: [Self; 3] = [Self::Soft, Self::Mixed, Self::Hard];

    /// Lowercase name used in flags and labels
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Mixed => "mixed",
            Self::Hard => "hard",
        }
    }

    /// The `git reset` flag for this mode
    #[must_use]
    pub fn flag(self) -> String {
        format!("--{}", self.as_str())
    }
}

/// Narrow git capability consumed by the panels
///
/// Every mutating call either succeeds or reports a [`CommandError`]; callers
/// request refreshes only after success.
pub trait GitBackend {
    /// List remote-tracking branches in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the branches cannot be listed
    fn fetch_remote_branches(&self) -> Result<Vec<RemoteBranch>, CommandError>;

    /// Name of the checked-out branch, `None` on a detached HEAD
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read
    fn checked_out_branch(&self) -> Result<Option<String>, CommandError>;

    /// List local branch names
    ///
    /// # Errors
    ///
    /// Returns an error if the branches cannot be listed
    fn local_branches(&self) -> Result<Vec<String>, CommandError>;

    /// List configured remote names
    ///
    /// # Errors
    ///
    /// Returns an error if the remotes cannot be listed
    fn remotes(&self) -> Result<Vec<String>, CommandError>;

    /// Check out a ref
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout fails
    fn checkout(&self, reference: &str) -> Result<(), CommandError>;

    /// Merge `branch` into the checked-out branch
    ///
    /// # Errors
    ///
    /// Returns an error if the merge fails or stops on conflicts
    fn merge(&self, branch: &str) -> Result<(), CommandError>;

    /// Rebase the checked-out branch onto `branch`
    ///
    /// # Errors
    ///
    /// Returns an error if the rebase fails or stops on conflicts
    fn rebase(&self, branch: &str) -> Result<(), CommandError>;

    /// Delete `branch` on `remote`
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails
    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<(), CommandError>;

    /// Set the upstream of local branch `local` to `remote/branch`
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream cannot be set
    fn set_upstream(&self, remote: &str, branch: &str, local: &str) -> Result<(), CommandError>;

    /// Create and check out branch `name` at `base`
    ///
    /// # Errors
    ///
    /// Returns an error if the branch cannot be created
    fn new_branch(&self, name: &str, base: &str) -> Result<(), CommandError>;

    /// Reset the checked-out branch to `target`
    ///
    /// # Errors
    ///
    /// Returns an error if the reset fails
    fn reset(&self, target: &str, mode: ResetMode) -> Result<(), CommandError>;

    /// Start `spec` off the UI loop, streaming its stdout into `sink`
    ///
    /// Returns once the command has been started; output arrives through the
    /// sink's channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started
    fn stream(&self, spec: &CommandSpec, sink: OutputSink) -> Result<(), CommandError>;
}

/// Open a git repository at the given path
///
/// # Errors
///
/// Returns an error if the path is not a git repository
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {}", path.display()))
}

/// Get the root of the git repository containing the given path
///
/// # Errors
///
/// Returns an error if the path is not inside a git repository
pub fn repository_root(path: &Path) -> Result<PathBuf> {
    let repo = open_repository(path)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .context("Repository has no working directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::git(["log", "--graph", "origin/main"]);
        assert_eq!(spec.to_string(), "git log --graph origin/main");
    }

    #[test]
    fn test_command_spec_from_argv() {
        let spec = CommandSpec::from_argv(vec!["tig".to_string(), "origin/dev".to_string()]);
        assert_eq!(
            spec,
            Some(CommandSpec {
                program: "tig".to_string(),
                args: vec!["origin/dev".to_string()],
            })
        );
        assert_eq!(CommandSpec::from_argv(Vec::new()), None);
    }

    #[test]
    fn test_reset_mode_flags() {
        let flags: Vec<String> = ResetMode::ALL.iter().map(|mode| mode.flag()).collect();
        assert_eq!(flags, vec!["--soft", "--mixed", "--hard"]);
    }

    #[test]
    fn test_command_error_messages() {
        let err = CommandError::Failed {
            command: "git push origin --delete main".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "remote rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`git push origin --delete main` failed (exit status: 1): remote rejected"
        );
        assert_eq!(
            CommandError::Rejected("nope".to_string()).to_string(),
            "nope"
        );
    }

    #[test]
    fn test_repository_root() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        Repository::init(temp_dir.path())?;
        let root = repository_root(temp_dir.path())?;
        assert_eq!(root.canonicalize()?, temp_dir.path().canonicalize()?);

        let non_repo = TempDir::new()?;
        assert!(open_repository(non_repo.path()).is_err());
        Ok(())
    }
}
