//! TUI rendering
//!
//! - `colors`: Color palette definitions
//! - `modals`: Gate and error overlays

pub(crate) mod colors;
pub(crate) mod modals;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::app::App;
use crate::config::ActionGroup;
use crate::git::GitBackend;
use crate::panel::{BranchesContext, Gate, PanelHost};
use crate::ui::{DetailViewWidget, NameListWidget, RemoteBranchListWidget, StatusBarWidget};

/// Render the full application UI
pub fn render<G: GitBackend>(frame: &mut Frame<'_>, app: &App<G>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[0]);

    render_branches_pane(frame, app, panes[0]);
    render_detail_pane(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[1]);

    if let Some(message) = app.error() {
        modals::render_error_modal(frame, &app.strings().localize("ErrorTitle"), message);
        return;
    }

    match app.remote_branches().gate() {
        Gate::Closed => {}
        Gate::Confirm { title, message, .. } => {
            modals::render_confirm_overlay(frame, title, message);
        }
        Gate::Prompt {
            title,
            message,
            input,
            ..
        } => modals::render_input_overlay(frame, title, message, input),
        Gate::Menu {
            title,
            items,
            selected,
        } => modals::render_menu_overlay(frame, title, items, *selected),
    }
}

fn render_branches_pane<G: GitBackend>(frame: &mut Frame<'_>, app: &App<G>, area: Rect) {
    let strings = app.strings();
    let workspace = app.workspace();

    match app.context() {
        BranchesContext::LocalBranches => {
            let checked_out = workspace.checked_out_branch();
            let list = NameListWidget::new(workspace.local_branches(), workspace.local_selection())
                .marked(checked_out.as_deref())
                .title(format!(" {} ", strings.localize("LocalBranchesTitle")))
                .to_list();
            frame.render_widget(list, area);
        }
        BranchesContext::Remotes => {
            let list = NameListWidget::new(workspace.remotes(), workspace.remote_selection())
                .title(format!(" {} ", strings.localize("RemotesTitle")))
                .to_list();
            frame.render_widget(list, area);
        }
        BranchesContext::RemoteBranches => {
            let rows = app.remote_branches().rows();
            let title = format!(
                " {} · {} ({}) ",
                workspace.selected_remote().unwrap_or_default(),
                strings.localize("RemoteBranchesTitle"),
                rows.len()
            );
            let list = RemoteBranchListWidget::new(rows)
                .title(title)
                .focused(!app.remote_branches().is_popup_active())
                .to_list();
            frame.render_widget(list, area);
        }
    }
}

fn render_detail_pane<G: GitBackend>(frame: &mut Frame<'_>, app: &App<G>, area: Rect) {
    let detail = app.remote_branches().detail();
    let paragraph = DetailViewWidget::new(detail.view(), detail.state()).to_paragraph();
    frame.render_widget(paragraph, area);
}

fn render_status_bar<G: GitBackend>(frame: &mut Frame<'_>, app: &App<G>, area: Rect) {
    let widget = match app.busy().current() {
        Some(status) => StatusBarWidget::busy(status),
        None => {
            let keys = &app.config.keys;
            let hints = match app.context() {
                BranchesContext::RemoteBranches => keys.status_hints(ActionGroup::Branch),
                _ => keys.status_hints(ActionGroup::Navigation),
            };
            StatusBarWidget::hints(format!("{hints}  {}", keys.status_hints(ActionGroup::Other)))
        }
    };
    frame.render_widget(widget.to_paragraph(), area);
}
