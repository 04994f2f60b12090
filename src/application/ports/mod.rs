//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_sink;
mod catalog;
mod job_queue;
mod render_engine;
mod row_store;
mod status_sink;

pub use audio_sink::{AudioClip, AudioSinkPort, PlaybackError};
pub use catalog::{CatalogError, SoundCatalogPort, VoiceCatalogPort};
pub use job_queue::{JobQueuePort, QueueError, QueueJob};
pub use render_engine::{RenderEnginePort, RenderError, RenderedAudio, DEFAULT_CONTENT_TYPE};
pub use row_store::{PanelRow, RowError, RowStorePort};
pub use status_sink::{PlaybackStatus, StatusSinkPort};
