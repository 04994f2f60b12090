//! In-Memory Job Queue Implementation
//!
//! 有界队列，`fetch_next_job` 只查看队首而不出队，任务需通过 `delete_job` 显式删除

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{JobQueuePort, QueueError, QueueJob};

/// 默认队列容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// 内存任务队列
pub struct InMemoryJobQueue {
    jobs: Mutex<VecDeque<QueueJob>>,
    capacity: usize,
}

impl InMemoryJobQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 入队，满时丢弃最旧的任务；返回任务 id
    pub async fn push(&self, mut job: QueueJob) -> String {
        let id = job.id.clone().unwrap_or_else(short_id);
        job.id = Some(id.clone());

        let mut jobs = self.jobs.lock().await;
        if jobs.len() >= self.capacity {
            if let Some(dropped) = jobs.pop_front() {
                tracing::warn!(job_id = ?dropped.id, "Queue full, oldest job dropped");
            }
        }
        jobs.push_back(job);
        tracing::debug!(job_id = %id, queued = jobs.len(), "Job queued");
        id
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }
}

impl Default for InMemoryJobQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

#[async_trait]
impl JobQueuePort for InMemoryJobQueue {
    async fn fetch_next_job(&self) -> Result<Option<QueueJob>, QueueError> {
        let mut jobs = self.jobs.lock().await;
        let Some(head) = jobs.front_mut() else {
            return Ok(None);
        };
        if head.id.is_none() {
            head.id = Some(short_id());
        }
        Ok(Some(head.clone()))
    }

    async fn delete_job(&self, id: &str) -> Result<usize, QueueError> {
        if id.is_empty() {
            return Err(QueueError::InvalidId(id.to_string()));
        }
        let mut jobs = self.jobs.lock().await;
        let before = jobs.len();
        jobs.retain(|job| job.id.as_deref() != Some(id));
        let deleted = before - jobs.len();
        tracing::debug!(job_id = %id, deleted = deleted, "Job deleted");
        Ok(deleted)
    }
}
