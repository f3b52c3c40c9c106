//! Helper functions for test setup and common operations

use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use branchline::App;
use branchline::git::GitBackend;
use branchline::panel::TaskState;

/// Run git in `dir`, returning trimmed stdout
///
/// # Errors
///
/// Returns an error if git cannot be started or exits unsuccessfully
pub fn git(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()?;

    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Tick `app` until the detail task leaves the running state
///
/// # Errors
///
/// Returns an error if the task is still running after `timeout`
pub fn wait_for_detail<G: GitBackend>(
    app: &mut App<G>,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let deadline = Instant::now() + timeout;
    loop {
        app.tick();
        if !matches!(app.remote_branches().detail().state(), TaskState::Running) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err("detail task did not finish in time".into());
        }
        thread::sleep(Duration::from_millis(10));
    }
}
