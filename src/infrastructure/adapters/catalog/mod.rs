//! Catalog Adapters - 音色与音效目录实现

mod fs_sound_catalog;
mod static_voice_catalog;

pub use fs_sound_catalog::{FsSoundCatalog, FsSoundCatalogConfig, DEFAULT_SOUND_EXTENSIONS};
pub use static_voice_catalog::StaticVoiceCatalog;
