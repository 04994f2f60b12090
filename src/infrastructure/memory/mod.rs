//! Memory Layer - In-Memory State Management
//!
//! 注册表缓存、面板状态、面板行、本地任务队列与音频输出的内存实现

mod audio_sink;
mod job_queue;
mod panel_state;
mod registry_cache;
mod row_store;

pub use audio_sink::MemoryAudioSink;
pub use job_queue::{InMemoryJobQueue, DEFAULT_QUEUE_CAPACITY};
pub use panel_state::PanelState;
pub use registry_cache::RegistryCache;
pub use row_store::{InMemoryRowStore, DEFAULT_MAX_ROWS};
