//! Job Queue Port - 外部待播任务队列
//!
//! 轮询器通过此接口读取队首任务

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 队列错误
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid job id: {0}")]
    InvalidId(String),
}

/// 外部任务
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueJob {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

impl QueueJob {
    pub fn new(text: impl Into<String>, voice: Option<&str>) -> Self {
        Self {
            id: None,
            text: text.into(),
            voice: voice.map(str::to_string),
        }
    }
}

/// Job Queue Port
#[async_trait]
pub trait JobQueuePort: Send + Sync {
    /// 读取下一个待处理任务（队列为空时返回 None）
    async fn fetch_next_job(&self) -> Result<Option<QueueJob>, QueueError>;

    /// 删除指定 id 的任务，返回删除数量
    async fn delete_job(&self, id: &str) -> Result<usize, QueueError>;
}
