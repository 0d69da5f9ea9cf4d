pub mod feed;
pub mod generator;
pub mod header;
pub mod help_overlay;
pub mod log_panel;
pub mod topic_list;
