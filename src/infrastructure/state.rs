//! Panel Services
//!
//! 按配置装配注册表、面板状态、面板行与所有命令处理器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddRowHandler, DeleteJobHandler, PlayRowHandler, PlaybackConfig, PlaybackOrchestrator,
    RefreshRegistryHandler, RemoveRowHandler, SubmitTextHandler,
    // Ports
    AudioSinkPort, JobQueuePort, RenderEnginePort, RowStorePort,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::{FsSoundCatalog, FsSoundCatalogConfig, StaticVoiceCatalog};
use crate::infrastructure::memory::{InMemoryRowStore, PanelState, RegistryCache};
use crate::infrastructure::worker::{QueuePoller, QueuePollerConfig};

/// 面板服务
///
/// 渲染引擎、音频输出与任务队列由调用方提供，其余按配置创建
pub struct PanelServices {
    // ========== State ==========
    pub registry: Arc<RegistryCache>,
    pub panel: Arc<PanelState>,
    pub rows: Arc<dyn RowStorePort>,
    pub queue: Arc<dyn JobQueuePort>,
    pub orchestrator: Arc<PlaybackOrchestrator>,

    // ========== Command Handlers ==========
    pub add_row_handler: Arc<AddRowHandler>,
    pub submit_text_handler: SubmitTextHandler,
    pub play_row_handler: PlayRowHandler,
    pub remove_row_handler: RemoveRowHandler,
    pub delete_job_handler: DeleteJobHandler,
    pub refresh_registry_handler: RefreshRegistryHandler,

    poller_config: QueuePollerConfig,
}

impl PanelServices {
    /// 创建面板服务
    pub async fn from_config(
        config: &AppConfig,
        render_engine: Arc<dyn RenderEnginePort>,
        audio_sink: Arc<dyn AudioSinkPort>,
        queue: Arc<dyn JobQueuePort>,
    ) -> Self {
        let voice_catalog = Arc::new(StaticVoiceCatalog::from_config(&config.voices));
        let sound_catalog = Arc::new(FsSoundCatalog::new(FsSoundCatalogConfig {
            dir: config.sounds.dir.clone(),
            extensions: config.sounds.extensions.clone(),
            aliases: config.sounds.aliases.clone(),
        }));
        let registry =
            RegistryCache::new(voice_catalog, sound_catalog, config.sounds.url_prefix.clone())
                .arc();

        let panel = PanelState::new().arc();
        panel.select_voice(config.voices.default.clone()).await;

        let rows: Arc<dyn RowStorePort> = InMemoryRowStore::new(config.rows.max_rows).arc();

        let orchestrator = Arc::new(PlaybackOrchestrator::new(
            PlaybackConfig::from(&config.playback),
            registry.clone(),
            panel.clone(),
            render_engine,
            audio_sink,
        ));
        let add_row_handler = Arc::new(AddRowHandler::new(
            rows.clone(),
            panel.clone(),
            orchestrator.clone(),
        ));

        Self {
            registry: registry.clone(),
            panel: panel.clone(),
            rows: rows.clone(),
            queue: queue.clone(),
            orchestrator: orchestrator.clone(),

            submit_text_handler: SubmitTextHandler::new(add_row_handler.clone(), panel.clone()),
            play_row_handler: PlayRowHandler::new(rows.clone(), orchestrator),
            remove_row_handler: RemoveRowHandler::new(rows.clone()),
            delete_job_handler: DeleteJobHandler::new(rows, queue),
            refresh_registry_handler: RefreshRegistryHandler::new(registry, panel),
            add_row_handler,

            poller_config: QueuePollerConfig::from(&config.poller),
        }
    }

    /// 创建使用配置间隔的队列轮询器
    pub fn queue_poller(&self) -> QueuePoller {
        QueuePoller::new(
            self.poller_config.clone(),
            self.queue.clone(),
            self.panel.clone(),
            self.add_row_handler.clone(),
        )
    }
}
