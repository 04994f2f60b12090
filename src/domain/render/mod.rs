//! Render Context - 渲染请求限界上下文
//!
//! 职责:
//! - 渲染参数解析
//! - 单条/批量请求构建

mod options;
mod request;

pub use options::{parse_knob, RawRenderOptions, RenderOptions};
pub use request::{
    build_request, build_request_with_format, AudioFormat, BatchPart, BatchSpeech, RenderRequest,
    SingleSpeech,
};
