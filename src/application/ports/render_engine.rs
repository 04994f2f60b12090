//! Render Engine Port - 语音合成服务抽象
//!
//! 只定义请求/响应契约，传输方式不在本 crate 范围内

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::render::{BatchSpeech, SingleSpeech};

/// 响应未带 content-type 时使用
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAudio {
    /// 音频字节
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

impl RenderedAudio {
    pub fn new(audio_data: Vec<u8>, content_type: Option<&str>) -> Self {
        Self {
            audio_data,
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
        }
    }
}

/// Render Engine Port
#[async_trait]
pub trait RenderEnginePort: Send + Sync {
    /// 单条语音合成
    async fn render_single(&self, request: &SingleSpeech) -> Result<RenderedAudio, RenderError>;

    /// 批量合成（语音与音效按顺序拼接为一个输出）
    async fn render_batch(&self, request: &BatchSpeech) -> Result<RenderedAudio, RenderError>;
}
