//! Static Voice Catalog - 由配置提供的音色目录
//!
//! 实现 VoiceCatalogPort trait

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::application::ports::{CatalogError, VoiceCatalogPort};
use crate::config::VoicesConfig;
use crate::domain::registry::VoiceInfo;

/// 静态音色目录
pub struct StaticVoiceCatalog {
    voices: Vec<VoiceInfo>,
    aliases: BTreeMap<String, String>,
}

impl StaticVoiceCatalog {
    pub fn new(voices: Vec<VoiceInfo>, aliases: BTreeMap<String, String>) -> Self {
        Self { voices, aliases }
    }

    pub fn from_config(config: &VoicesConfig) -> Self {
        let voices = config
            .ids
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| VoiceInfo::new(id.trim()))
            .collect();
        Self::new(voices, config.aliases.clone())
    }
}

#[async_trait]
impl VoiceCatalogPort for StaticVoiceCatalog {
    async fn fetch_voices(&self) -> Result<Vec<VoiceInfo>, CatalogError> {
        Ok(self.voices.clone())
    }

    async fn fetch_aliases(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        Ok(self.aliases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_skips_blank_ids() {
        let mut config = VoicesConfig::default();
        config.ids = vec!["amy".to_string(), "  ".to_string()];
        config
            .aliases
            .insert("narrator".to_string(), "amy".to_string());

        let catalog = StaticVoiceCatalog::from_config(&config);
        let voices = catalog.fetch_voices().await.unwrap();
        assert_eq!(voices, vec![VoiceInfo::new("amy")]);
        assert_eq!(catalog.fetch_aliases().await.unwrap().len(), 1);
    }
}
