//! 应用层 - 命令
//!
//! 面板操作与注册表刷新

mod panel_commands;
mod registry_commands;

pub mod handlers;

pub use panel_commands::*;
pub use registry_commands::*;
