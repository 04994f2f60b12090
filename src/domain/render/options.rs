//! Render Context - 渲染参数

use serde::{Deserialize, Serialize};

/// 渲染参数（原样透传给合成服务）
///
/// 数值参数只保证是有限数或缺省，不做范围校验
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub preset: Option<String>,
    pub length_scale: Option<f64>,
    pub noise_w: Option<f64>,
    pub sentence_silence: Option<f64>,
    pub speaker_id: Option<f64>,
}

/// 面板输入框中的原始参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRenderOptions {
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub length_scale: String,
    #[serde(default)]
    pub noise_w: String,
    #[serde(default)]
    pub sentence_silence: String,
    #[serde(default)]
    pub speaker_id: String,
}

/// 解析单个数值参数：空白或非有限数视为缺省
pub fn parse_knob(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl RenderOptions {
    pub fn from_raw(raw: &RawRenderOptions) -> Self {
        let preset = raw.preset.trim();
        Self {
            preset: (!preset.is_empty()).then(|| preset.to_string()),
            length_scale: parse_knob(&raw.length_scale),
            noise_w: parse_knob(&raw.noise_w),
            sentence_silence: parse_knob(&raw.sentence_silence),
            speaker_id: parse_knob(&raw.speaker_id),
        }
    }

    /// 预设名，未设置时用于展示
    pub fn preset_label(&self) -> &str {
        self.preset.as_deref().unwrap_or("(none)")
    }
}
