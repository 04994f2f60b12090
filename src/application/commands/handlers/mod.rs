//! Command Handlers 实现
//!
//! 播放编排与面板操作

mod panel_handlers;
mod playback_handlers;
mod registry_handlers;

pub use panel_handlers::*;
pub use playback_handlers::*;
pub use registry_handlers::*;
