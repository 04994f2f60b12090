//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（RenderEngine、Catalog、JobQueue、AudioSink 等）
//! - commands: 面板命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    // Panel commands
    AddRowCommand,
    AddRowResponse,
    DeleteJobCommand,
    DeleteJobResponse,
    PlayRowCommand,
    PlayRowResponse,
    RemoveRowCommand,
    SubmitTextCommand,
    // Registry commands
    RefreshRegistryCommand,
    RefreshRegistryResponse,
    // Handlers
    handlers::{
        AddRowHandler, DeleteJobHandler, PlayError, PlayRowHandler, PlaybackConfig,
        PlaybackOrchestrator, RefreshRegistryHandler, RemoveRowHandler, RowStatusSink,
        SubmitTextHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio sink
    AudioClip,
    AudioSinkPort,
    PlaybackError,
    // Catalogs
    CatalogError,
    SoundCatalogPort,
    VoiceCatalogPort,
    // Job queue
    JobQueuePort,
    QueueError,
    QueueJob,
    // Render engine
    RenderEnginePort,
    RenderError,
    RenderedAudio,
    // Rows
    PanelRow,
    RowError,
    RowStorePort,
    // Status
    PlaybackStatus,
    StatusSinkPort,
};
