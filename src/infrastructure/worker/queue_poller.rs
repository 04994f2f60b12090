//! Queue Poller - 外部任务队列轮询
//!
//! 两种状态：轮询关闭时长间隔空转，开启时每轮最多取一个任务

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::commands::handlers::AddRowHandler;
use crate::application::commands::AddRowCommand;
use crate::application::ports::JobQueuePort;
use crate::config::PollerConfig;
use crate::infrastructure::memory::PanelState;

/// Poller 配置
#[derive(Debug, Clone)]
pub struct QueuePollerConfig {
    /// 轮询关闭时的检查间隔
    pub idle_interval: Duration,
    /// 轮询开启时的检查间隔
    pub active_interval: Duration,
}

impl Default for QueuePollerConfig {
    fn default() -> Self {
        Self {
            idle_interval: Duration::from_millis(600),
            active_interval: Duration::from_millis(400),
        }
    }
}

impl From<&PollerConfig> for QueuePollerConfig {
    fn from(config: &PollerConfig) -> Self {
        Self {
            idle_interval: config.idle_interval(),
            active_interval: config.active_interval(),
        }
    }
}

/// 队列轮询器
pub struct QueuePoller {
    config: QueuePollerConfig,
    queue: Arc<dyn JobQueuePort>,
    panel: Arc<PanelState>,
    add_row: Arc<AddRowHandler>,
}

impl QueuePoller {
    pub fn new(
        config: QueuePollerConfig,
        queue: Arc<dyn JobQueuePort>,
        panel: Arc<PanelState>,
        add_row: Arc<AddRowHandler>,
    ) -> Self {
        Self {
            config,
            queue,
            panel,
            add_row,
        }
    }

    /// 执行一轮检查，返回下一轮前的等待时间
    ///
    /// 任何失败都不会中断循环
    pub async fn poll_once(&self) -> Duration {
        if !self.panel.is_polling() {
            return self.config.idle_interval;
        }

        let job = match self.queue.fetch_next_job().await {
            Ok(Some(job)) => job,
            Ok(None) => return self.config.active_interval,
            Err(e) => {
                tracing::debug!(error = %e, "Queue fetch failed");
                return self.config.active_interval;
            }
        };

        if job.text.is_empty() {
            tracing::debug!(job_id = ?job.id, "Skipping job without text");
            return self.config.active_interval;
        }

        let voice = match job.voice.filter(|v| !v.is_empty()) {
            Some(voice) => Some(voice),
            None => self.panel.selected_voice().await,
        };

        // 轮询取到的任务不自动播放
        let cmd = AddRowCommand {
            text: job.text,
            voice,
            job_id: job.id,
            allow_autoplay: false,
        };
        if let Err(e) = self.add_row.handle(cmd).await {
            tracing::debug!(error = %e, "Failed to add queued job");
        }

        self.config.active_interval
    }

    /// 启动后台轮询
    pub fn start(self) -> PollerHandle {
        let token = CancellationToken::new();
        let child = token.clone();

        let join = tokio::spawn(async move {
            tracing::info!(
                idle_ms = self.config.idle_interval.as_millis() as u64,
                active_ms = self.config.active_interval.as_millis() as u64,
                "QueuePoller started"
            );

            loop {
                let delay = self.poll_once().await;
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            tracing::info!("QueuePoller stopped");
        });

        PollerHandle { token, join }
    }
}

/// 后台轮询句柄
pub struct PollerHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl PollerHandle {
    /// 停止轮询并等待循环退出
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "QueuePoller task ended abnormally");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::{PlaybackConfig, PlaybackOrchestrator};
    use crate::application::ports::{PlaybackStatus, QueueError, QueueJob, RowStorePort};
    use crate::config::VoicesConfig;
    use crate::infrastructure::adapters::{
        FakeRenderClient, FakeRenderClientConfig, FsSoundCatalog, FsSoundCatalogConfig,
        StaticVoiceCatalog,
    };
    use crate::infrastructure::memory::{
        InMemoryJobQueue, InMemoryRowStore, MemoryAudioSink, RegistryCache,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        rows: Arc<InMemoryRowStore>,
        panel: Arc<PanelState>,
        render: Arc<FakeRenderClient>,
        add_row: Arc<AddRowHandler>,
    }

    fn fixture() -> Fixture {
        let registry = RegistryCache::new(
            Arc::new(StaticVoiceCatalog::from_config(&VoicesConfig::default())),
            Arc::new(FsSoundCatalog::new(FsSoundCatalogConfig::new("does-not-exist"))),
            "/sounds/",
        )
        .arc();
        let panel = PanelState::new().arc();
        let render = Arc::new(FakeRenderClient::new(FakeRenderClientConfig::default()));
        let orchestrator = Arc::new(PlaybackOrchestrator::new(
            PlaybackConfig::default(),
            registry,
            panel.clone(),
            render.clone(),
            MemoryAudioSink::new().arc(),
        ));
        let rows = InMemoryRowStore::default().arc();
        let add_row = Arc::new(AddRowHandler::new(
            rows.clone(),
            panel.clone(),
            orchestrator,
        ));
        Fixture {
            rows,
            panel,
            render,
            add_row,
        }
    }

    fn poller(f: &Fixture, queue: Arc<dyn JobQueuePort>) -> QueuePoller {
        QueuePoller::new(
            QueuePollerConfig::default(),
            queue,
            f.panel.clone(),
            f.add_row.clone(),
        )
    }

    #[test]
    fn test_config_from_settings() {
        let settings = PollerConfig {
            idle_interval_ms: 900,
            active_interval_ms: 250,
        };
        let config = QueuePollerConfig::from(&settings);
        assert_eq!(config.idle_interval, Duration::from_millis(900));
        assert_eq!(config.active_interval, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_idle_does_not_fetch() {
        let f = fixture();
        let queue = InMemoryJobQueue::default().arc();
        queue.push(QueueJob::new("hello", None)).await;

        let delay = poller(&f, queue).poll_once().await;
        assert_eq!(delay, Duration::from_millis(600));
        assert!(f.rows.list().is_empty());
    }

    #[tokio::test]
    async fn test_active_adds_row_without_autoplay() {
        let f = fixture();
        f.panel.select_voice(Some("amy".to_string())).await;
        f.panel.set_polling(true);
        let queue = InMemoryJobQueue::default().arc();
        let job_id = queue.push(QueueJob::new("hello", None)).await;

        let delay = poller(&f, queue).poll_once().await;
        assert_eq!(delay, Duration::from_millis(400));

        let rows = f.rows.list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job_id.as_deref(), Some(job_id.as_str()));
        assert_eq!(rows[0].voice.as_deref(), Some("amy"));
        assert_eq!(rows[0].status, PlaybackStatus::Queued);
        assert!(f.render.recorded().await.is_empty());
    }

    #[tokio::test]
    async fn test_job_voice_overrides_selection() {
        let f = fixture();
        f.panel.select_voice(Some("amy".to_string())).await;
        f.panel.set_polling(true);
        let queue = InMemoryJobQueue::default().arc();
        queue.push(QueueJob::new("hello", Some("bob"))).await;

        poller(&f, queue).poll_once().await;
        assert_eq!(f.rows.list()[0].voice.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_peeked_job_listed_once() {
        let f = fixture();
        f.panel.set_polling(true);
        let queue = InMemoryJobQueue::default().arc();
        queue.push(QueueJob::new("hello", None)).await;
        let poller = poller(&f, queue);

        poller.poll_once().await;
        poller.poll_once().await;
        assert_eq!(f.rows.list().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_job_ignored() {
        let f = fixture();
        f.panel.set_polling(true);
        let queue = InMemoryJobQueue::default().arc();
        queue.push(QueueJob::new("", None)).await;

        poller(&f, queue).poll_once().await;
        assert!(f.rows.list().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_job_still_listed() {
        let f = fixture();
        f.panel.set_polling(true);
        let queue = InMemoryJobQueue::default().arc();
        queue.push(QueueJob::new("  ", None)).await;

        poller(&f, queue).poll_once().await;
        assert_eq!(f.rows.list().len(), 1);
    }

    struct FlakyQueue {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl JobQueuePort for FlakyQueue {
        async fn fetch_next_job(&self) -> Result<Option<QueueJob>, QueueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(QueueError::Unavailable("down".to_string()))
        }

        async fn delete_job(&self, _id: &str) -> Result<usize, QueueError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_active_cadence() {
        let f = fixture();
        f.panel.set_polling(true);
        let queue = Arc::new(FlakyQueue {
            calls: AtomicUsize::new(0),
        });

        let delay = poller(&f, queue.clone()).poll_once().await;
        assert_eq!(delay, Duration::from_millis(400));
        assert_eq!(queue.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_follows_polling_flag() {
        let f = fixture();
        let queue = Arc::new(FlakyQueue {
            calls: AtomicUsize::new(0),
        });
        let handle = poller(&f, queue.clone()).start();

        // 空转期间不取任务
        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(queue.calls.load(Ordering::SeqCst), 0);

        f.panel.set_polling(true);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        let fetched = queue.calls.load(Ordering::SeqCst);
        assert!(fetched >= 3, "fetched {} times", fetched);
        assert!(handle.is_running());

        f.panel.set_autoplay(true);
        assert!(!f.panel.is_polling());
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let after_pause = queue.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(queue.calls.load(Ordering::SeqCst), after_pause);

        // 再次开启后恢复取任务
        f.panel.set_polling(true);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        let resumed = queue.calls.load(Ordering::SeqCst);
        assert!(resumed >= after_pause + 3, "resumed at {}", resumed);
        assert!(handle.is_running());

        handle.stop().await;
    }
}
