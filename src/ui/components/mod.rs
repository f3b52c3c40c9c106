pub mod detail_view;
pub mod name_list;
pub mod remote_branch_list;
pub mod status_bar;
