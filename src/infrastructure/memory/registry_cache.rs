//! Registry Cache - 音色/音效查找表缓存
//!
//! 显式持有、按需刷新；刷新失败的一半被置空而不是保留旧值

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{SoundCatalogPort, VoiceCatalogPort};
use crate::domain::registry::{SoundEffectRegistry, VoiceCatalog};

/// 注册表缓存
pub struct RegistryCache {
    voice_source: Arc<dyn VoiceCatalogPort>,
    sound_source: Arc<dyn SoundCatalogPort>,
    /// 音效资源 URL 前缀
    url_prefix: String,
    voices: RwLock<Arc<VoiceCatalog>>,
    sounds: RwLock<Arc<SoundEffectRegistry>>,
}

impl RegistryCache {
    pub fn new(
        voice_source: Arc<dyn VoiceCatalogPort>,
        sound_source: Arc<dyn SoundCatalogPort>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            voice_source,
            sound_source,
            url_prefix: url_prefix.into(),
            voices: RwLock::new(Arc::new(VoiceCatalog::empty())),
            sounds: RwLock::new(Arc::new(SoundEffectRegistry::empty())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 重建音色目录与音效注册表
    ///
    /// 两次获取相互独立，任何一方失败都只会让对应部分为空，不会返回错误
    pub async fn refresh(&self) {
        let (voices, sounds) = tokio::join!(self.load_voices(), self.load_sounds());

        tracing::info!(
            known_voices = voices.known_count(),
            sound_effects = sounds.len(),
            "Registry refreshed"
        );

        *self.voices.write().await = Arc::new(voices);
        *self.sounds.write().await = Arc::new(sounds);
    }

    async fn load_voices(&self) -> VoiceCatalog {
        let voices = match self.voice_source.fetch_voices().await {
            Ok(voices) => voices,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch voices, leaving empty");
                Vec::new()
            }
        };
        let aliases = match self.voice_source.fetch_aliases().await {
            Ok(aliases) => aliases,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch voice aliases, leaving empty");
                Default::default()
            }
        };
        VoiceCatalog::new(aliases, voices)
    }

    async fn load_sounds(&self) -> SoundEffectRegistry {
        match self.sound_source.fetch_sound_index().await {
            Ok(index) => SoundEffectRegistry::from_index(&index, &self.url_prefix),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch sound index, leaving empty");
                SoundEffectRegistry::empty()
            }
        }
    }

    /// 当前音效注册表快照
    pub async fn sound_registry(&self) -> Arc<SoundEffectRegistry> {
        self.sounds.read().await.clone()
    }

    /// 当前音色目录快照
    pub async fn voice_catalog(&self) -> Arc<VoiceCatalog> {
        self.voices.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CatalogError;
    use crate::domain::registry::{SoundIndex, SoundIndexEntry, VoiceInfo};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct TestVoices {
        fail_voices: AtomicBool,
        fail_aliases: AtomicBool,
    }

    #[async_trait]
    impl VoiceCatalogPort for TestVoices {
        async fn fetch_voices(&self) -> Result<Vec<VoiceInfo>, CatalogError> {
            if self.fail_voices.load(Ordering::SeqCst) {
                return Err(CatalogError::NetworkError("down".to_string()));
            }
            Ok(vec![VoiceInfo::new("en_US-lessac")])
        }

        async fn fetch_aliases(&self) -> Result<BTreeMap<String, String>, CatalogError> {
            if self.fail_aliases.load(Ordering::SeqCst) {
                return Err(CatalogError::ServiceError("HTTP 500".to_string()));
            }
            let mut aliases = BTreeMap::new();
            aliases.insert("Narrator".to_string(), "en_US-lessac".to_string());
            Ok(aliases)
        }
    }

    struct TestSounds {
        fail: AtomicBool,
    }

    #[async_trait]
    impl SoundCatalogPort for TestSounds {
        async fn fetch_sound_index(&self) -> Result<SoundIndex, CatalogError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CatalogError::NetworkError("down".to_string()));
            }
            let mut index = SoundIndex::default();
            index.index.insert(
                "boo".to_string(),
                SoundIndexEntry {
                    file: "boo.mp3".to_string(),
                },
            );
            index
                .aliases
                .insert("dangling".to_string(), "missing".to_string());
            Ok(index)
        }
    }

    fn cache() -> (Arc<TestVoices>, Arc<TestSounds>, RegistryCache) {
        let voices = Arc::new(TestVoices {
            fail_voices: AtomicBool::new(false),
            fail_aliases: AtomicBool::new(false),
        });
        let sounds = Arc::new(TestSounds {
            fail: AtomicBool::new(false),
        });
        let cache = RegistryCache::new(voices.clone(), sounds.clone(), "/sounds/");
        (voices, sounds, cache)
    }

    #[tokio::test]
    async fn test_empty_before_refresh() {
        let (_, _, cache) = cache();
        assert!(cache.sound_registry().await.is_empty());
        assert_eq!(cache.voice_catalog().await.known_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_builds_both_halves() {
        let (_, _, cache) = cache();
        cache.refresh().await;

        let sounds = cache.sound_registry().await;
        assert_eq!(sounds.asset_path("boo"), Some("/sounds/boo.mp3"));
        assert!(!sounds.contains("dangling"));

        let voices = cache.voice_catalog().await;
        assert!(voices.is_known_voice("narrator"));
        assert!(voices.is_known_voice("en_us-lessac"));
    }

    #[tokio::test]
    async fn test_failed_half_is_emptied_not_stale() {
        let (voices, sounds, cache) = cache();
        cache.refresh().await;

        sounds.fail.store(true, Ordering::SeqCst);
        cache.refresh().await;

        assert!(cache.sound_registry().await.is_empty());
        assert!(cache.voice_catalog().await.is_known_voice("narrator"));

        voices.fail_voices.store(true, Ordering::SeqCst);
        cache.refresh().await;
        let catalog = cache.voice_catalog().await;
        assert!(catalog.is_known_voice("narrator"));
        assert!(!catalog.is_known_voice("en_us-lessac"));
    }

    #[tokio::test]
    async fn test_alias_failure_keeps_voices() {
        let (voices, _, cache) = cache();
        voices.fail_aliases.store(true, Ordering::SeqCst);
        cache.refresh().await;

        let catalog = cache.voice_catalog().await;
        assert!(!catalog.is_known_voice("narrator"));
        assert!(catalog.is_known_voice("en_us-lessac"));
    }
}
