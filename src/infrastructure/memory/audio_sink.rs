//! In-Memory Audio Sink Implementation
//!
//! 单一播放输出：加载即替换，记录播放次数

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::{AudioClip, AudioSinkPort, PlaybackError};

/// 内存播放输出
pub struct MemoryAudioSink {
    current: Mutex<Option<AudioClip>>,
    play_count: AtomicU64,
    /// 模拟播放器拒绝播放（例如浏览器自动播放策略）
    reject_playback: AtomicBool,
}

impl MemoryAudioSink {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            play_count: AtomicU64::new(0),
            reject_playback: AtomicBool::new(false),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_reject_playback(&self, reject: bool) {
        self.reject_playback.store(reject, Ordering::SeqCst);
    }

    pub fn play_count(&self) -> u64 {
        self.play_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioSinkPort for MemoryAudioSink {
    async fn load(&self, clip: AudioClip) {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.as_ref() {
            tracing::debug!(previous = %previous.id, next = %clip.id, "Audio source replaced");
        }
        *current = Some(clip);
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        let current = self.current.lock().await;
        let clip = current.as_ref().ok_or(PlaybackError::NoSource)?;
        if self.reject_playback.load(Ordering::SeqCst) {
            return Err(PlaybackError::Rejected("playback not allowed".to_string()));
        }
        self.play_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            clip_id = %clip.id,
            content_type = %clip.content_type,
            size = clip.data.len(),
            "Playback started"
        );
        Ok(())
    }

    async fn current(&self) -> Option<AudioClip> {
        self.current.lock().await.clone()
    }
}
