//! Branchline - a remote branches panel for git
//!
//! Branchline lists the branches of a git remote, previews each one's commit
//! graph as it streams in, and runs the usual branch actions (checkout,
//! merge, rebase, delete, set upstream, reset, branch off) behind
//! confirmation and prompt modals.

mod command;

pub mod app;
pub mod config;
pub mod git;
pub mod i18n;
pub mod panel;
pub mod paths;
pub mod tui;
pub mod ui;

pub use app::App;
pub use config::Config;
