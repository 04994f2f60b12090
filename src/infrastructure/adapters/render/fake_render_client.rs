//! Fake Render Client - 用于测试与本地试运行的渲染客户端
//!
//! 返回固定的音频数据，记录收到的请求，不实际调用渲染服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::application::ports::{RenderEnginePort, RenderError, RenderedAudio};
use crate::domain::render::{BatchSpeech, RenderRequest, SingleSpeech};

/// Fake Render Client 配置
#[derive(Debug, Clone)]
pub struct FakeRenderClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 单段请求返回的内容类型
    pub single_content_type: String,
    /// 模拟渲染延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeRenderClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"RIFF....WAVE".to_vec(),
            single_content_type: "audio/wav".to_string(),
            latency_ms: 0,
        }
    }
}

/// Fake Render Client
pub struct FakeRenderClient {
    config: FakeRenderClientConfig,
    requests: Mutex<Vec<RenderRequest>>,
    failing: AtomicBool,
}

impl FakeRenderClient {
    pub fn new(config: FakeRenderClientConfig) -> Self {
        tracing::info!(
            payload_size = config.audio_data.len(),
            latency_ms = config.latency_ms,
            "FakeRenderClient initialized"
        );
        Self {
            config,
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeRenderClientConfig::default())
    }

    /// 之后的请求全部以 500 失败
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 已收到的请求（按到达顺序）
    pub async fn recorded(&self) -> Vec<RenderRequest> {
        self.requests.lock().await.clone()
    }

    async fn respond(
        &self,
        request: RenderRequest,
        content_type: &str,
    ) -> Result<RenderedAudio, RenderError> {
        self.requests.lock().await.push(request);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(RenderError::StatusError {
                status: 500,
                body: "fake render failure".to_string(),
            });
        }

        Ok(RenderedAudio::new(
            self.config.audio_data.clone(),
            Some(content_type),
        ))
    }
}

#[async_trait]
impl RenderEnginePort for FakeRenderClient {
    async fn render_single(&self, request: &SingleSpeech) -> Result<RenderedAudio, RenderError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = ?request.voice,
            "FakeRenderClient: single speech"
        );
        let content_type = self.config.single_content_type.clone();
        self.respond(RenderRequest::Single(request.clone()), &content_type)
            .await
    }

    async fn render_batch(&self, request: &BatchSpeech) -> Result<RenderedAudio, RenderError> {
        tracing::debug!(
            parts = request.parts.len(),
            format = request.format.as_str(),
            "FakeRenderClient: batch speech"
        );
        self.respond(RenderRequest::Batch(request.clone()), request.format.mime_type())
            .await
    }
}
