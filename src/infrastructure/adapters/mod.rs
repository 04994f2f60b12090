//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod catalog;
pub mod render;

pub use catalog::*;
pub use render::*;
