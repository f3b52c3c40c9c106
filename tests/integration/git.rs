//! Tests for the git command-line backend

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc;
use std::time::Duration;

use branchline::git::{
    CommandError, CommandSpec, GitBackend, GitCli, OutputSink, RemoteBranch, ResetMode,
    StreamEvent,
};
use pretty_assertions::assert_eq;

use crate::common::{TestFixture, git};

#[test]
fn test_fetch_remote_branches_skips_head() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login", "bugfix/crash"])?;
    git(&fixture.repo_path, &["remote", "set-head", "origin", "master"])?;
    let cli = GitCli::new(&fixture.repo_path);

    let branches = cli.fetch_remote_branches()?;

    assert_eq!(
        branches,
        vec![
            RemoteBranch::new("origin", "bugfix/crash"),
            RemoteBranch::new("origin", "feature/login"),
            RemoteBranch::new("origin", "master"),
        ]
    );
    Ok(())
}

#[test]
fn test_queries_report_branches_and_remotes() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let cli = GitCli::discover(&fixture.repo_path)?;

    assert_eq!(cli.checked_out_branch()?, Some("master".to_string()));
    assert_eq!(cli.remotes()?, vec!["origin".to_string()]);
    assert_eq!(
        cli.local_branches()?,
        vec!["feature/login".to_string(), "master".to_string()]
    );
    Ok(())
}

#[test]
fn test_detached_head_has_no_checked_out_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&[])?;
    git(&fixture.repo_path, &["checkout", "--detach"])?;
    let cli = GitCli::new(&fixture.repo_path);

    assert_eq!(cli.checked_out_branch()?, None);
    Ok(())
}

#[test]
fn test_delete_remote_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login", "bugfix/crash"])?;
    let cli = GitCli::new(&fixture.repo_path);

    cli.delete_remote_branch("origin", "bugfix/crash")?;

    assert_eq!(
        fixture.remote_heads()?,
        vec!["feature/login".to_string(), "master".to_string()]
    );
    assert!(
        !cli.fetch_remote_branches()?
            .contains(&RemoteBranch::new("origin", "bugfix/crash"))
    );
    Ok(())
}

#[test]
fn test_delete_missing_branch_fails() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&[])?;
    let cli = GitCli::new(&fixture.repo_path);

    let result = cli.delete_remote_branch("origin", "does-not-exist");

    assert!(matches!(result, Err(CommandError::Failed { .. })));
    Ok(())
}

#[test]
fn test_new_branch_off_remote_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    git(&fixture.repo_path, &["branch", "-D", "feature/login"])?;
    let cli = GitCli::new(&fixture.repo_path);

    cli.new_branch("login", "origin/feature/login")?;

    assert_eq!(cli.checked_out_branch()?, Some("login".to_string()));
    assert_eq!(
        git(&fixture.repo_path, &["rev-parse", "HEAD"])?,
        git(&fixture.repo_path, &["rev-parse", "origin/feature/login"])?
    );
    Ok(())
}

#[test]
fn test_set_upstream() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let cli = GitCli::new(&fixture.repo_path);

    cli.set_upstream("origin", "feature/login", "master")?;

    assert_eq!(
        git(
            &fixture.repo_path,
            &["rev-parse", "--abbrev-ref", "master@{upstream}"]
        )?,
        "origin/feature/login"
    );
    Ok(())
}

#[test]
fn test_hard_reset_to_remote_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let cli = GitCli::new(&fixture.repo_path);

    cli.reset("origin/feature/login", ResetMode::Hard)?;

    assert_eq!(
        git(&fixture.repo_path, &["rev-parse", "HEAD"])?,
        git(&fixture.repo_path, &["rev-parse", "origin/feature/login"])?
    );
    assert!(fixture.repo_path.join("feature-login.txt").exists());
    Ok(())
}

#[test]
fn test_merge_fast_forwards_checked_out_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let cli = GitCli::new(&fixture.repo_path);

    cli.merge("origin/feature/login")?;

    assert!(fixture.repo_path.join("feature-login.txt").exists());
    Ok(())
}

#[test]
fn test_stream_branch_log() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let cli = GitCli::new(&fixture.repo_path);
    let (tx, rx) = mpsc::channel();
    let sink = OutputSink::new(7, Arc::new(AtomicU64::new(7)), tx);

    cli.stream(
        &CommandSpec::git(["log", "--oneline", "origin/feature/login", "--"]),
        sink,
    )?;

    let mut lines = Vec::new();
    loop {
        let message = rx.recv_timeout(Duration::from_secs(10))?;
        assert_eq!(message.generation, 7);
        match message.event {
            StreamEvent::Line(line) => lines.push(line),
            StreamEvent::Done => break,
            StreamEvent::Failed(reason) => return Err(reason.into()),
        }
    }

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Work on feature/login"));
    assert!(lines[1].ends_with("Initial commit"));
    Ok(())
}

#[test]
fn test_stream_unknown_revision_fails() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&[])?;
    let cli = GitCli::new(&fixture.repo_path);
    let (tx, rx) = mpsc::channel();
    let sink = OutputSink::new(1, Arc::new(AtomicU64::new(1)), tx);

    cli.stream(&CommandSpec::git(["log", "origin/missing", "--"]), sink)?;

    let message = rx.recv_timeout(Duration::from_secs(10))?;
    assert!(matches!(message.event, StreamEvent::Failed(_)));
    Ok(())
}
