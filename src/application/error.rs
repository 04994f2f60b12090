//! 应用层错误定义
//!
//! 统一的命令处理错误类型

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{QueueError, RowError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }
}

impl From<RowError> for ApplicationError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::NotFound(id) => Self::not_found("Row", id),
            other => Self::InternalError(other.to_string()),
        }
    }
}

impl From<QueueError> for ApplicationError {
    fn from(err: QueueError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
