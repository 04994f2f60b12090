//! Registry Commands - 注册表刷新命令

/// 刷新注册表命令
#[derive(Debug, Clone, Default)]
pub struct RefreshRegistryCommand;

/// 刷新注册表响应
#[derive(Debug, Clone)]
pub struct RefreshRegistryResponse {
    pub known_voices: usize,
    pub sound_effects: usize,
    pub selected_voice: Option<String>,
}
