//! Registry Context - 音色与音效查找表
//!
//! 职责:
//! - 音效主索引与别名合并
//! - 音色别名与音色 id 的并集

mod sound_registry;
mod voice_catalog;

pub use sound_registry::{
    SoundEffectRegistry, SoundIndex, SoundIndexEntry, DEFAULT_SOUND_URL_PREFIX,
};
pub use voice_catalog::{VoiceCatalog, VoiceInfo, VoiceOption, VoiceOptionKind};
