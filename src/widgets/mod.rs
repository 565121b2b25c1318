pub mod audit_log;
pub mod error_toast;
pub mod footer;
pub mod help_overlay;
pub mod status_bar;
