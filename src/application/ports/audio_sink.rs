//! Audio Sink Port - 唯一的共享播放输出
//!
//! 新加载的音频总是替换之前的音频（后写者胜）

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Playback rejected: {0}")]
    Rejected(String),

    #[error("No audio loaded")]
    NoSource,
}

/// 可播放的音频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub id: Uuid,
    pub data: Vec<u8>,
    pub content_type: String,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            content_type: content_type.into(),
        }
    }
}

/// Audio Sink Port
#[async_trait]
pub trait AudioSinkPort: Send + Sync {
    /// 替换当前加载的音频
    async fn load(&self, clip: AudioClip);

    /// 播放当前音频
    async fn play(&self) -> Result<(), PlaybackError>;

    /// 当前加载的音频
    async fn current(&self) -> Option<AudioClip>;
}
