//! Markup Context - 内联标记限界上下文
//!
//! 职责:
//! - 音色指令扫描
//! - 音效引用识别
//! - 片段序列生成

mod parser;
mod segment;

pub use parser::{
    has_sound_effect_refs, parse_segments, parse_segments_with, scan_directives, MarkupConfig,
    DEFAULT_MAX_SOUND_EFFECTS,
};
pub use segment::{Segment, VoiceDirective};
