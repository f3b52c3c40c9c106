//! UI components for the TUI
//!
//! Reusable widgets; layout and modals live in the `tui` module.

mod components;

pub use components::{
    detail_view::Widget as DetailViewWidget,
    name_list::Widget as NameListWidget,
    remote_branch_list::{Widget as RemoteBranchListWidget, kind_to_color},
    status_bar::Widget as StatusBarWidget,
};
