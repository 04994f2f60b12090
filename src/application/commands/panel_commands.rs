//! Panel Commands - 面板行相关命令

use uuid::Uuid;

use crate::application::ports::PlaybackStatus;

/// 添加行命令
#[derive(Debug, Clone)]
pub struct AddRowCommand {
    pub text: String,
    pub voice: Option<String>,
    /// 来自外部队列时的任务 id
    pub job_id: Option<String>,
    /// 为 false 时即使开启自动播放也不播放
    pub allow_autoplay: bool,
}

/// 添加行响应
#[derive(Debug, Clone)]
pub struct AddRowResponse {
    /// 同一任务已存在时为 None
    pub row_id: Option<Uuid>,
    pub autoplay_started: bool,
}

/// 提交文本命令（操作员输入）
#[derive(Debug, Clone)]
pub struct SubmitTextCommand {
    pub text: String,
}

/// 播放行命令
#[derive(Debug, Clone)]
pub struct PlayRowCommand {
    pub row_id: Uuid,
}

/// 播放行响应
#[derive(Debug, Clone)]
pub struct PlayRowResponse {
    pub row_id: Uuid,
    pub status: PlaybackStatus,
}

/// 移除行命令（只影响面板）
#[derive(Debug, Clone)]
pub struct RemoveRowCommand {
    pub row_id: Uuid,
}

/// 删除任务命令（删除外部任务并移除行）
#[derive(Debug, Clone)]
pub struct DeleteJobCommand {
    pub row_id: Uuid,
}

/// 删除任务响应
#[derive(Debug, Clone)]
pub struct DeleteJobResponse {
    pub row_id: Uuid,
    pub deleted_jobs: usize,
}
