//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Markup Context: 内联标记解析
//! - Render Context: 渲染请求构建
//! - Registry Context: 音色与音效查找表

pub mod markup;
pub mod registry;
pub mod render;

pub use markup::{parse_segments, Segment};
pub use render::{build_request, RenderRequest};
