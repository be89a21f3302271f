pub mod detail;
pub mod format;
pub mod header;
pub mod list;
pub mod sidebar;
pub mod theme;
