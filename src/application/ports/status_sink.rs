//! Status Sink Port - 播放状态输出

use serde::{Deserialize, Serialize};

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// 来自外部队列，尚未播放
    Queued,
    /// 本地提交，尚未播放
    Ready,
    /// 单条请求已发出
    Playing,
    /// 批量请求已发出
    Rendering,
    Done,
    Error,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Queued => "queued",
            PlaybackStatus::Ready => "ready",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Rendering => "rendering",
            PlaybackStatus::Done => "done",
            PlaybackStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status Sink Port
///
/// 接收单次播放过程中的状态变化
pub trait StatusSinkPort: Send + Sync {
    fn report(&self, status: PlaybackStatus);
}
