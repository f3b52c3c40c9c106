//! End-to-end flows through the app over a real repository

use std::time::Duration;

use branchline::App;
use branchline::config::Config;
use branchline::git::{GitBackend, GitCli};
use branchline::panel::{BranchesContext, Gate, PanelHost, TaskState};
use pretty_assertions::assert_eq;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::common::{TestFixture, git, wait_for_detail};

fn open_origin(fixture: &TestFixture) -> Result<App<GitCli>, Box<dyn std::error::Error>> {
    let mut app = App::new(Config::default(), GitCli::new(&fixture.repo_path));
    app.load()?;
    app.open_remote("origin")?;
    Ok(app)
}

fn press(app: &mut App<GitCli>, code: KeyCode) {
    app.handle_key(code, KeyModifiers::NONE);
}

fn selected_name(app: &App<GitCli>) -> Option<String> {
    app.remote_branches()
        .selected_branch()
        .map(|branch| branch.full_name())
}

#[test]
fn test_open_remote_streams_graph_of_first_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let mut app = open_origin(&fixture)?;

    assert_eq!(app.context(), BranchesContext::RemoteBranches);
    assert_eq!(selected_name(&app).as_deref(), Some("origin/feature/login"));

    wait_for_detail(&mut app, Duration::from_secs(10))?;
    let detail = app.remote_branches().detail();
    assert_eq!(detail.state(), &TaskState::Completed);
    assert!(
        detail
            .view()
            .lines
            .iter()
            .any(|line| line.contains("Work on feature/login"))
    );
    Ok(())
}

#[test]
fn test_delete_through_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["bugfix/crash", "feature/login"])?;
    let mut app = open_origin(&fixture)?;
    assert_eq!(selected_name(&app).as_deref(), Some("origin/bugfix/crash"));

    press(&mut app, KeyCode::Char('d'));
    match app.remote_branches().gate() {
        Gate::Confirm { message, .. } => assert!(message.contains("'origin/bugfix/crash'")),
        other => return Err(format!("expected a confirmation, got {other:?}").into()),
    }
    // Nothing runs before the answer
    assert!(fixture.remote_heads()?.contains(&"bugfix/crash".to_string()));

    press(&mut app, KeyCode::Char('y'));

    assert!(app.error().is_none());
    assert_eq!(
        fixture.remote_heads()?,
        vec!["feature/login".to_string(), "master".to_string()]
    );
    let names: Vec<String> = app
        .remote_branches()
        .branches()
        .iter()
        .map(|branch| branch.full_name())
        .collect();
    assert_eq!(names, vec!["origin/feature/login", "origin/master"]);
    assert!(app.busy().current().is_none());
    Ok(())
}

#[test]
fn test_branch_off_checks_out_new_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    git(&fixture.repo_path, &["branch", "-D", "feature/login"])?;
    let mut app = open_origin(&fixture)?;

    press(&mut app, KeyCode::Char('n'));
    let seeded = match app.remote_branches().gate() {
        Gate::Prompt { input, .. } => input.text().to_string(),
        other => return Err(format!("expected a prompt, got {other:?}").into()),
    };
    assert_eq!(seeded, "origin/feature/login");

    for _ in seeded.chars() {
        press(&mut app, KeyCode::Backspace);
    }
    for c in "login".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    assert!(app.error().is_none());
    assert_eq!(app.context(), BranchesContext::LocalBranches);
    assert_eq!(app.git().checked_out_branch()?, Some("login".to_string()));

    // The workspace catches up on the next tick
    app.tick();
    assert_eq!(app.workspace().checked_out_branch(), Some("login".to_string()));
    assert!(app.workspace().local_branches().contains(&"login".to_string()));
    Ok(())
}

#[test]
fn test_checkout_blocked_by_untracked_file_reports_error() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&["feature/login"])?;
    let mut app = open_origin(&fixture)?;
    // An untracked file the remote branch also tracks blocks the checkout
    std::fs::write(fixture.repo_path.join("feature-login.txt"), "local edits")?;

    press(&mut app, KeyCode::Char(' '));

    assert!(app.error().is_some());
    assert_eq!(app.context(), BranchesContext::RemoteBranches);
    assert_eq!(app.git().checked_out_branch()?, Some("master".to_string()));

    // Any key dismisses the error
    press(&mut app, KeyCode::Char('x'));
    assert!(app.error().is_none());
    assert!(!app.should_quit());
    Ok(())
}

#[test]
fn test_escape_returns_to_remotes() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new(&[])?;
    let mut app = open_origin(&fixture)?;

    press(&mut app, KeyCode::Esc);

    assert_eq!(app.context(), BranchesContext::Remotes);
    assert_eq!(app.workspace().selected_remote(), Some("origin"));
    Ok(())
}
