//! Markup Context - Value Objects

use serde::{Deserialize, Serialize};

/// 解析后的片段
///
/// 不变量:
/// - 解析结果永不为空
/// - Speech 的 text 已去除首尾空白（整段回退时保留原文）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// 语音片段
    Speech {
        text: String,
        voice: Option<String>,
    },
    /// 音效引用
    SoundEffect {
        /// 原文中的写法
        name: String,
        /// 小写后的注册表键
        registry_key: String,
    },
}

impl Segment {
    pub fn speech(text: impl Into<String>, voice: Option<&str>) -> Self {
        Self::Speech {
            text: text.into(),
            voice: voice.map(str::to_string),
        }
    }

    pub fn sound_effect(name: impl Into<String>) -> Self {
        let name = name.into();
        let registry_key = name.to_ascii_lowercase();
        Self::SoundEffect { name, registry_key }
    }

    pub fn is_speech(&self) -> bool {
        matches!(self, Self::Speech { .. })
    }

    pub fn is_sound_effect(&self) -> bool {
        matches!(self, Self::SoundEffect { .. })
    }

    /// 片段使用的音色（音效片段为 None）
    pub fn voice(&self) -> Option<&str> {
        match self {
            Self::Speech { voice, .. } => voice.as_deref(),
            Self::SoundEffect { .. } => None,
        }
    }
}

/// 音色指令 - `name:` 形式的内联切换标记
///
/// `start` 为指令本身在输入中的字节偏移，`applies_from` 为其后文本的起始偏移
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDirective {
    pub voice: String,
    pub start: usize,
    pub applies_from: usize,
}
