//! Worker Layer - Background Task Processing
//!
//! 实现 QueuePoller，轮询外部任务队列

mod queue_poller;

pub use queue_poller::{PollerHandle, QueuePoller, QueuePollerConfig};
