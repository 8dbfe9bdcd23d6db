//! UI module for the TUI.

mod footer;
mod header;
mod layout;
mod sidebar;
pub mod tabs;

pub use layout::draw_ui;
