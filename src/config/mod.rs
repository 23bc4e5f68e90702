//! Tool configuration files.
pub mod search_tool;
