//! TTS Panel - 语音合成操作面板核心
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Markup Context: 内联音色指令与音效引用解析
//! - Render Context: 单条/批量渲染请求构建
//! - Registry Context: 音色别名与音效注册表
//!
//! 应用层 (application/):
//! - Ports: 端口定义（RenderEngine, Catalogs, JobQueue, AudioSink, StatusSink, RowStore）
//! - Commands: 播放编排与面板命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - Memory: 注册表缓存、面板状态、面板行、任务队列、音频输出
//! - Worker: QueuePoller 后台轮询
//! - Adapters: 音色/音效目录, Fake 渲染客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
