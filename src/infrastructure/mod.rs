//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;
pub mod state;
pub mod worker;

pub use memory::{InMemoryJobQueue, InMemoryRowStore, MemoryAudioSink, PanelState, RegistryCache};
pub use state::PanelServices;
pub use worker::{PollerHandle, QueuePoller, QueuePollerConfig};
