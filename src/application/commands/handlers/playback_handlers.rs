//! Playback Orchestrator
//!
//! 解析 -> 构建请求 -> 渲染 -> 播放，并把过程状态写入状态输出

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    AudioClip, AudioSinkPort, PlaybackError, PlaybackStatus, RenderEnginePort, RenderError,
    StatusSinkPort,
};
use crate::config::PlaybackSettings;
use crate::domain::markup::{parse_segments_with, MarkupConfig, Segment};
use crate::domain::render::{build_request_with_format, AudioFormat, RenderRequest};
use crate::infrastructure::memory::{PanelState, RegistryCache};

/// 单次播放失败原因
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

/// 播放配置
#[derive(Debug, Clone, Default)]
pub struct PlaybackConfig {
    pub markup: MarkupConfig,
    /// 批量请求的输出格式
    pub batch_format: AudioFormat,
}

impl From<&PlaybackSettings> for PlaybackConfig {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            markup: MarkupConfig {
                max_sound_effects: settings.max_sound_effects,
            },
            batch_format: settings.batch_format,
        }
    }
}

/// 播放编排器
///
/// 每次调用只发出一个渲染请求；共享播放输出上后写者胜
pub struct PlaybackOrchestrator {
    config: PlaybackConfig,
    registry: Arc<RegistryCache>,
    panel: Arc<PanelState>,
    render_engine: Arc<dyn RenderEnginePort>,
    audio_sink: Arc<dyn AudioSinkPort>,
}

impl PlaybackOrchestrator {
    pub fn new(
        config: PlaybackConfig,
        registry: Arc<RegistryCache>,
        panel: Arc<PanelState>,
        render_engine: Arc<dyn RenderEnginePort>,
        audio_sink: Arc<dyn AudioSinkPort>,
    ) -> Self {
        Self {
            config,
            registry,
            panel,
            render_engine,
            audio_sink,
        }
    }

    /// 按当前注册表与面板参数构建请求
    pub async fn prepare(&self, full_text: &str, fallback_voice: Option<&str>) -> RenderRequest {
        let registry = self.registry.sound_registry().await;
        let segments: Vec<Segment> =
            parse_segments_with(full_text, fallback_voice, &registry, &self.config.markup);
        let options = self.panel.render_options().await;
        build_request_with_format(&segments, &options, self.config.batch_format)
    }

    /// 播放文本
    ///
    /// 失败只体现在状态输出上，不向调用方返回错误
    pub async fn play(
        &self,
        full_text: &str,
        fallback_voice: Option<&str>,
        status: &dyn StatusSinkPort,
    ) {
        let request = self.prepare(full_text, fallback_voice).await;

        status.report(if request.is_single() {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Rendering
        });

        match self.render_and_play(&request).await {
            Ok(()) => status.report(PlaybackStatus::Done),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    batch = request.is_batch(),
                    text_len = full_text.len(),
                    "Playback failed"
                );
                status.report(PlaybackStatus::Error);
            }
        }
    }

    async fn render_and_play(&self, request: &RenderRequest) -> Result<(), PlayError> {
        let rendered = match request {
            RenderRequest::Single(single) => self.render_engine.render_single(single).await?,
            RenderRequest::Batch(batch) => self.render_engine.render_batch(batch).await?,
        };

        let clip = AudioClip::new(rendered.audio_data, rendered.content_type);
        tracing::debug!(
            clip_id = %clip.id,
            content_type = %clip.content_type,
            size = clip.data.len(),
            "Rendered audio loaded"
        );

        self.audio_sink.load(clip).await;
        self.audio_sink.play().await?;
        Ok(())
    }
}
