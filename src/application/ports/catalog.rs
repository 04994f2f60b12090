//! Catalog Port - 音色/音效目录抽象
//!
//! 定义注册表刷新所需的外部获取接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::registry::{SoundIndex, VoiceInfo};

/// 目录获取错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Voice Catalog Port
///
/// 音色列表与音色别名表
#[async_trait]
pub trait VoiceCatalogPort: Send + Sync {
    /// 获取所有音色
    async fn fetch_voices(&self) -> Result<Vec<VoiceInfo>, CatalogError>;

    /// 获取音色别名表（别名 -> 音色 id）
    async fn fetch_aliases(&self) -> Result<BTreeMap<String, String>, CatalogError>;
}

/// Sound Catalog Port
#[async_trait]
pub trait SoundCatalogPort: Send + Sync {
    /// 获取音效主索引与别名表
    async fn fetch_sound_index(&self) -> Result<SoundIndex, CatalogError>;
}
