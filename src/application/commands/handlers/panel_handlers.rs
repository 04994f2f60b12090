//! Panel Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use super::playback_handlers::PlaybackOrchestrator;
use crate::application::commands::panel_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    JobQueuePort, PanelRow, PlaybackStatus, RowStorePort, StatusSinkPort,
};
use crate::infrastructure::memory::PanelState;

/// 把播放状态写入面板行
pub struct RowStatusSink {
    rows: Arc<dyn RowStorePort>,
    row_id: Uuid,
}

impl RowStatusSink {
    pub fn new(rows: Arc<dyn RowStorePort>, row_id: Uuid) -> Self {
        Self { rows, row_id }
    }
}

impl StatusSinkPort for RowStatusSink {
    fn report(&self, status: PlaybackStatus) {
        if let Err(e) = self.rows.set_status(self.row_id, status) {
            // 行可能已被移除
            tracing::debug!(row_id = %self.row_id, error = %e, "Status dropped");
        }
    }
}

/// Add Row Handler - 添加行，必要时自动播放
pub struct AddRowHandler {
    rows: Arc<dyn RowStorePort>,
    panel: Arc<PanelState>,
    orchestrator: Arc<PlaybackOrchestrator>,
}

impl AddRowHandler {
    pub fn new(
        rows: Arc<dyn RowStorePort>,
        panel: Arc<PanelState>,
        orchestrator: Arc<PlaybackOrchestrator>,
    ) -> Self {
        Self {
            rows,
            panel,
            orchestrator,
        }
    }

    pub async fn handle(&self, cmd: AddRowCommand) -> Result<AddRowResponse, ApplicationError> {
        if let Some(job_id) = cmd.job_id.as_deref() {
            if self.rows.contains_job(job_id) {
                tracing::debug!(job_id = %job_id, "Job already listed, skipping");
                return Ok(AddRowResponse {
                    row_id: None,
                    autoplay_started: false,
                });
            }
        }

        let options = self.panel.render_options().await;
        let row = PanelRow::new(
            cmd.text.clone(),
            cmd.voice.clone(),
            cmd.job_id.clone(),
            options.preset_label(),
        );
        let row_id = self.rows.insert(row)?;

        let autoplay_started = cmd.allow_autoplay && self.panel.is_autoplay();
        if autoplay_started {
            let orchestrator = self.orchestrator.clone();
            let sink = RowStatusSink::new(self.rows.clone(), row_id);
            let text = cmd.text;
            let voice = cmd.voice;
            // 不等待播放完成
            tokio::spawn(async move {
                orchestrator.play(&text, voice.as_deref(), &sink).await;
            });
        }

        tracing::info!(
            row_id = %row_id,
            job_id = ?cmd.job_id,
            autoplay = autoplay_started,
            "Row added"
        );

        Ok(AddRowResponse {
            row_id: Some(row_id),
            autoplay_started,
        })
    }
}

/// Submit Text Handler - 操作员提交文本
pub struct SubmitTextHandler {
    add_row: Arc<AddRowHandler>,
    panel: Arc<PanelState>,
}

impl SubmitTextHandler {
    pub fn new(add_row: Arc<AddRowHandler>, panel: Arc<PanelState>) -> Self {
        Self { add_row, panel }
    }

    /// 空白文本被忽略，返回 None
    pub async fn handle(
        &self,
        cmd: SubmitTextCommand,
    ) -> Result<Option<AddRowResponse>, ApplicationError> {
        let text = cmd.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let voice = self.panel.selected_voice().await;
        let response = self
            .add_row
            .handle(AddRowCommand {
                text: text.to_string(),
                voice,
                job_id: None,
                allow_autoplay: true,
            })
            .await?;
        Ok(Some(response))
    }
}

/// Play Row Handler - 播放指定行并等待完成
pub struct PlayRowHandler {
    rows: Arc<dyn RowStorePort>,
    orchestrator: Arc<PlaybackOrchestrator>,
}

impl PlayRowHandler {
    pub fn new(rows: Arc<dyn RowStorePort>, orchestrator: Arc<PlaybackOrchestrator>) -> Self {
        Self { rows, orchestrator }
    }

    pub async fn handle(&self, cmd: PlayRowCommand) -> Result<PlayRowResponse, ApplicationError> {
        let row = self.rows.get(cmd.row_id)?;
        let sink = RowStatusSink::new(self.rows.clone(), row.id);

        self.orchestrator
            .play(&row.text, row.voice.as_deref(), &sink)
            .await;

        let status = self.rows.get(row.id)?.status;
        Ok(PlayRowResponse {
            row_id: row.id,
            status,
        })
    }
}

/// Remove Row Handler - 只从面板移除
pub struct RemoveRowHandler {
    rows: Arc<dyn RowStorePort>,
}

impl RemoveRowHandler {
    pub fn new(rows: Arc<dyn RowStorePort>) -> Self {
        Self { rows }
    }

    pub fn handle(&self, cmd: RemoveRowCommand) -> Result<(), ApplicationError> {
        self.rows.remove(cmd.row_id)?;
        tracing::debug!(row_id = %cmd.row_id, "Row removed");
        Ok(())
    }
}

/// Delete Job Handler - 删除外部任务后移除行
pub struct DeleteJobHandler {
    rows: Arc<dyn RowStorePort>,
    queue: Arc<dyn JobQueuePort>,
}

impl DeleteJobHandler {
    pub fn new(rows: Arc<dyn RowStorePort>, queue: Arc<dyn JobQueuePort>) -> Self {
        Self { rows, queue }
    }

    /// 外部删除失败时保留该行
    pub async fn handle(
        &self,
        cmd: DeleteJobCommand,
    ) -> Result<DeleteJobResponse, ApplicationError> {
        let row = self.rows.get(cmd.row_id)?;

        let deleted_jobs = match row.job_id.as_deref() {
            Some(job_id) => self.queue.delete_job(job_id).await?,
            None => 0,
        };
        self.rows.remove(row.id)?;

        tracing::info!(
            row_id = %row.id,
            job_id = ?row.job_id,
            deleted_jobs = deleted_jobs,
            "Job deleted"
        );

        Ok(DeleteJobResponse {
            row_id: row.id,
            deleted_jobs,
        })
    }
}
