//! Registry Command Handlers

use std::sync::Arc;

use crate::application::commands::registry_commands::*;
use crate::infrastructure::memory::{PanelState, RegistryCache};

/// Refresh Registry Handler - 刷新注册表并校正当前音色
pub struct RefreshRegistryHandler {
    registry: Arc<RegistryCache>,
    panel: Arc<PanelState>,
}

impl RefreshRegistryHandler {
    pub fn new(registry: Arc<RegistryCache>, panel: Arc<PanelState>) -> Self {
        Self { registry, panel }
    }

    /// 刷新不会失败，获取失败的部分为空
    pub async fn handle(&self, _cmd: RefreshRegistryCommand) -> RefreshRegistryResponse {
        self.registry.refresh().await;

        let catalog = self.registry.voice_catalog().await;
        let sounds = self.registry.sound_registry().await;
        let selected_voice = self
            .panel
            .reconcile_selected_voice(&catalog.options())
            .await;

        RefreshRegistryResponse {
            known_voices: catalog.known_count(),
            sound_effects: sounds.len(),
            selected_voice,
        }
    }
}
