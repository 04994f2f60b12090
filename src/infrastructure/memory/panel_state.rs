//! Panel State - 面板模式与当前选择
//!
//! 轮询与自动播放互斥：开启任意一个会关闭另一个

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::registry::VoiceOption;
use crate::domain::render::{RawRenderOptions, RenderOptions};

/// 面板状态
pub struct PanelState {
    polling: AtomicBool,
    autoplay: AtomicBool,
    selected_voice: RwLock<Option<String>>,
    render_options: RwLock<RenderOptions>,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            polling: AtomicBool::new(false),
            autoplay: AtomicBool::new(false),
            selected_voice: RwLock::new(None),
            render_options: RwLock::new(RenderOptions::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 切换队列轮询
    pub fn set_polling(&self, on: bool) {
        self.polling.store(on, Ordering::SeqCst);
        if on {
            self.autoplay.store(false, Ordering::SeqCst);
        }
        tracing::debug!(polling = on, "Polling toggled");
    }

    /// 切换自动播放
    pub fn set_autoplay(&self, on: bool) {
        self.autoplay.store(on, Ordering::SeqCst);
        if on {
            self.polling.store(false, Ordering::SeqCst);
        }
        tracing::debug!(autoplay = on, "Autoplay toggled");
    }

    pub fn is_polling(&self) -> bool {
        self.polling.load(Ordering::SeqCst)
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay.load(Ordering::SeqCst)
    }

    pub async fn selected_voice(&self) -> Option<String> {
        self.selected_voice.read().await.clone()
    }

    pub async fn select_voice(&self, voice: Option<String>) {
        *self.selected_voice.write().await = voice.filter(|v| !v.is_empty());
    }

    /// 刷新后保留仍然可选的音色，否则选中第一个选项
    pub async fn reconcile_selected_voice(&self, options: &[VoiceOption]) -> Option<String> {
        let mut selected = self.selected_voice.write().await;
        let keep = selected
            .as_ref()
            .is_some_and(|current| options.iter().any(|o| &o.value == current));
        if !keep {
            *selected = options.first().map(|o| o.value.clone());
        }
        selected.clone()
    }

    pub async fn render_options(&self) -> RenderOptions {
        self.render_options.read().await.clone()
    }

    pub async fn set_render_options(&self, options: RenderOptions) {
        *self.render_options.write().await = options;
    }

    /// 从面板输入框的原始值更新渲染参数
    pub async fn set_raw_render_options(&self, raw: &RawRenderOptions) {
        self.set_render_options(RenderOptions::from_raw(raw)).await;
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
