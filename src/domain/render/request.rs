//! Render Context - 渲染请求
//!
//! 单条请求与批量请求的序列化形状与合成服务的请求体一致

use serde::{Deserialize, Serialize};

use super::options::RenderOptions;
use crate::domain::markup::Segment;

/// 批量输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

/// 单条语音请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSpeech {
    pub text: String,
    pub voice: Option<String>,
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// 批量请求中的一段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchPart {
    Speech { text: String, voice: Option<String> },
    SoundEffect { sfx: String },
}

/// 批量请求（多段合成为一个输出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSpeech {
    pub parts: Vec<BatchPart>,
    pub format: AudioFormat,
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// 渲染请求，每次播放尝试构建一次
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderRequest {
    Single(SingleSpeech),
    Batch(BatchSpeech),
}

impl RenderRequest {
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

impl From<&Segment> for BatchPart {
    fn from(segment: &Segment) -> Self {
        match segment {
            Segment::Speech { text, voice } => BatchPart::Speech {
                text: text.clone(),
                voice: voice.clone(),
            },
            Segment::SoundEffect { registry_key, .. } => BatchPart::SoundEffect {
                sfx: registry_key.clone(),
            },
        }
    }
}

/// 构建渲染请求
///
/// 仅当片段列表恰好是一个语音片段时构建单条请求，其余情况一律批量，
/// 批量请求中的顺序与片段顺序完全一致
pub fn build_request_with_format(
    segments: &[Segment],
    options: &RenderOptions,
    format: AudioFormat,
) -> RenderRequest {
    if let [Segment::Speech { text, voice }] = segments {
        return RenderRequest::Single(SingleSpeech {
            text: text.clone(),
            voice: voice.clone(),
            options: options.clone(),
        });
    }

    RenderRequest::Batch(BatchSpeech {
        parts: segments.iter().map(BatchPart::from).collect(),
        format,
        options: options.clone(),
    })
}

/// 使用默认输出格式（mp3）构建
pub fn build_request(segments: &[Segment], options: &RenderOptions) -> RenderRequest {
    build_request_with_format(segments, options, AudioFormat::default())
}
