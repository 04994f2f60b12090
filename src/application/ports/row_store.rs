//! Row Store Port - 面板行管理
//!
//! 定义面板行的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::status_sink::PlaybackStatus;

/// Row Store 错误
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Row not found: {0}")]
    NotFound(Uuid),

    #[error("Row already exists: {0}")]
    AlreadyExists(Uuid),
}

/// 面板行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub id: Uuid,
    /// 来自外部队列时的任务 id
    pub job_id: Option<String>,
    pub text: String,
    pub voice: Option<String>,
    pub preset_label: String,
    pub status: PlaybackStatus,
    pub created_at: DateTime<Utc>,
}

impl PanelRow {
    pub fn new(
        text: impl Into<String>,
        voice: Option<String>,
        job_id: Option<String>,
        preset_label: impl Into<String>,
    ) -> Self {
        let status = if job_id.is_some() {
            PlaybackStatus::Queued
        } else {
            PlaybackStatus::Ready
        };
        Self {
            id: Uuid::new_v4(),
            job_id,
            text: text.into(),
            voice,
            preset_label: preset_label.into(),
            status,
            created_at: Utc::now(),
        }
    }

    pub fn voice_label(&self) -> &str {
        self.voice.as_deref().unwrap_or("(auto)")
    }
}

/// Row Store Port
pub trait RowStorePort: Send + Sync {
    /// 插入新行（最新的排在最前）
    fn insert(&self, row: PanelRow) -> Result<Uuid, RowError>;

    fn get(&self, id: Uuid) -> Result<PanelRow, RowError>;

    fn set_status(&self, id: Uuid, status: PlaybackStatus) -> Result<(), RowError>;

    fn remove(&self, id: Uuid) -> Result<PanelRow, RowError>;

    /// 是否已有该任务对应的行
    fn contains_job(&self, job_id: &str) -> bool;

    /// 所有行，最新的在前
    fn list(&self) -> Vec<PanelRow>;
}
