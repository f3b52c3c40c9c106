//! `GitBackend` over the git command line

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Output, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::{
    CommandError, CommandSpec, GitBackend, OutputSink, RemoteBranch, ResetMode,
    parse_remote_branches,
};

/// Runs git in a repository working directory
#[derive(Debug, Clone)]
pub struct Cli {
    root: PathBuf,
}

impl Cli {
    /// Create a backend rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a backend for the repository containing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a git repository
    pub fn discover(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(super::repository_root(path)?))
    }

    /// Repository working directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&self.root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        command
    }

    fn execute(&self, spec: &CommandSpec) -> Result<Output, CommandError> {
        debug!(command = %spec, "Running git command");

        let output = self
            .command(spec)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: spec.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(CommandError::Failed {
                command: spec.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn run(&self, args: &[&str]) -> Result<(), CommandError> {
        self.execute(&CommandSpec::git(args.iter().copied()))
            .map(|_| ())
    }

    fn output(&self, args: &[&str]) -> Result<String, CommandError> {
        let output = self.execute(&CommandSpec::git(args.iter().copied()))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn lines(&self, args: &[&str]) -> Result<Vec<String>, CommandError> {
        Ok(self
            .output(args)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

impl GitBackend for Cli {
    fn fetch_remote_branches(&self) -> Result<Vec<RemoteBranch>, CommandError> {
        let output = self.output(&[
            "for-each-ref",
            "--sort=refname",
            "--format=%(refname)",
            "refs/remotes",
        ])?;
        parse_remote_branches(&output)
    }

    fn checked_out_branch(&self) -> Result<Option<String>, CommandError> {
        let name = self.output(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = name.trim();
        if name == "HEAD" || name.is_empty() {
            Ok(None)
        } else {
            Ok(Some(name.to_string()))
        }
    }

    fn local_branches(&self) -> Result<Vec<String>, CommandError> {
        self.lines(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])
    }

    fn remotes(&self) -> Result<Vec<String>, CommandError> {
        self.lines(&["remote"])
    }

    fn checkout(&self, reference: &str) -> Result<(), CommandError> {
        self.run(&["checkout", reference])
    }

    fn merge(&self, branch: &str) -> Result<(), CommandError> {
        self.run(&["merge", "--no-edit", branch])
    }

    fn rebase(&self, branch: &str) -> Result<(), CommandError> {
        self.run(&["rebase", branch])
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<(), CommandError> {
        self.run(&["push", remote, "--delete", branch])
    }

    fn set_upstream(&self, remote: &str, branch: &str, local: &str) -> Result<(), CommandError> {
        let upstream = format!("--set-upstream-to={remote}/{branch}");
        self.run(&["branch", &upstream, local])
    }

    fn new_branch(&self, name: &str, base: &str) -> Result<(), CommandError> {
        self.run(&["checkout", "-b", name, base])
    }

    fn reset(&self, target: &str, mode: ResetMode) -> Result<(), CommandError> {
        let flag = mode.flag();
        self.run(&["reset", &flag, target])
    }

    fn stream(&self, spec: &CommandSpec, sink: OutputSink) -> Result<(), CommandError> {
        let command = spec.to_string();
        debug!(command = %command, generation = sink.generation(), "Starting stream");

        let mut child = self
            .command(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            kill(&mut child);
            return Err(CommandError::Spawn {
                command,
                source: std::io::Error::other("stdout was not captured"),
            });
        };

        let stderr = match child.stderr.take().map(drain_stderr).transpose() {
            Ok(stderr) => stderr,
            Err(source) => {
                kill(&mut child);
                return Err(CommandError::Spawn { command, source });
            }
        };

        let thread_command = command.clone();
        thread::Builder::new()
            .name("detail-stream".to_string())
            .spawn(move || pump(child, stdout, stderr, &sink, &thread_command))
            .map(|_| ())
            .map_err(|source| CommandError::Spawn { command, source })
    }
}

/// Read stderr to the end on its own thread, concurrently with stdout
fn drain_stderr(mut pipe: ChildStderr) -> std::io::Result<JoinHandle<String>> {
    thread::Builder::new()
        .name("detail-stream-stderr".to_string())
        .spawn(move || {
            let mut buf = Vec::new();
            if let Err(err) = pipe.read_to_end(&mut buf) {
                warn!(error = %err, "Failed to read stream stderr");
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
}

/// Forward stdout to the sink line by line, then report the exit status
fn pump(
    mut child: Child,
    stdout: ChildStdout,
    stderr: Option<JoinHandle<String>>,
    sink: &OutputSink,
    command: &str,
) {
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();

    loop {
        if sink.is_stale() {
            debug!(command, "Stream superseded, stopping");
            kill(&mut child);
            return;
        }

        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                if !sink.line(line) {
                    kill(&mut child);
                    return;
                }
            }
            Err(err) => {
                sink.fail(format!("failed reading output of `{command}`: {err}"));
                kill(&mut child);
                return;
            }
        }
    }

    let status = child.wait();
    let stderr = stderr
        .map(|handle| {
            handle.join().unwrap_or_else(|_| {
                warn!(command, "Stream stderr reader panicked");
                String::new()
            })
        })
        .unwrap_or_default();

    match status {
        Ok(status) if status.success() => {
            sink.finish();
        }
        Ok(status) => {
            sink.fail(format!("`{command}` failed ({status}): {}", stderr.trim()));
        }
        Err(err) => {
            sink.fail(format!("failed waiting for `{command}`: {err}"));
        }
    }
}

fn kill(child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(error = %err, "Stream child already exited");
    }
    if let Err(err) = child.wait() {
        debug!(error = %err, "Failed to reap stream child");
    }
}
