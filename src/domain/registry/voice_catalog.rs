//! Registry Context - 音色目录

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 外部音色信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub id: String,
}

impl VoiceInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// 可选音色类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceOptionKind {
    Alias,
    Voice,
}

/// 面板可选音色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub value: String,
    pub label: String,
    pub kind: VoiceOptionKind,
}

/// 音色目录 - 别名表 + 音色 id + 小写并集
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCatalog {
    aliases: BTreeMap<String, String>,
    voices: Vec<VoiceInfo>,
    known: HashSet<String>,
}

impl VoiceCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(aliases: BTreeMap<String, String>, voices: Vec<VoiceInfo>) -> Self {
        let known = aliases
            .keys()
            .map(|name| name.to_lowercase())
            .chain(voices.iter().map(|v| v.id.to_lowercase()))
            .collect();
        Self {
            aliases,
            voices,
            known,
        }
    }

    /// 名称是否为已知别名或音色（不区分大小写）
    pub fn is_known_voice(&self, name: &str) -> bool {
        self.known.contains(&name.to_lowercase())
    }

    /// 解析别名到目标音色 id；已是音色 id 时原样返回
    pub fn resolve(&self, name: &str) -> Option<String> {
        let folded = name.to_lowercase();
        self.aliases
            .iter()
            .find(|(alias, _)| alias.to_lowercase() == folded)
            .map(|(_, target)| target.clone())
            .or_else(|| {
                self.voices
                    .iter()
                    .find(|v| v.id.to_lowercase() == folded)
                    .map(|v| v.id.clone())
            })
    }

    /// 面板下拉选项：先别名后音色
    pub fn options(&self) -> Vec<VoiceOption> {
        let aliases = self.aliases.iter().map(|(name, target)| VoiceOption {
            value: name.clone(),
            label: format!("{} → {}", name, target),
            kind: VoiceOptionKind::Alias,
        });
        let voices = self.voices.iter().map(|v| VoiceOption {
            value: v.id.clone(),
            label: v.id.clone(),
            kind: VoiceOptionKind::Voice,
        });
        aliases.chain(voices).collect()
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn voices(&self) -> &[VoiceInfo] {
        &self.voices
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VoiceCatalog {
        let mut aliases = BTreeMap::new();
        aliases.insert("Narrator".to_string(), "en_US-lessac".to_string());
        VoiceCatalog::new(
            aliases,
            vec![VoiceInfo::new("en_US-lessac"), VoiceInfo::new("de_DE-thorsten")],
        )
    }

    #[test]
    fn test_known_voice_is_case_folded_union() {
        let catalog = catalog();
        assert!(catalog.is_known_voice("narrator"));
        assert!(catalog.is_known_voice("EN_US-LESSAC"));
        assert!(!catalog.is_known_voice("bob"));
        assert_eq!(catalog.known_count(), 3);
    }

    #[test]
    fn test_resolve_alias_and_voice() {
        let catalog = catalog();
        assert_eq!(catalog.resolve("NARRATOR"), Some("en_US-lessac".to_string()));
        assert_eq!(catalog.resolve("de_de-thorsten"), Some("de_DE-thorsten".to_string()));
        assert_eq!(catalog.resolve("bob"), None);
    }

    #[test]
    fn test_options_aliases_first() {
        let options = catalog().options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].kind, VoiceOptionKind::Alias);
        assert_eq!(options[0].label, "Narrator → en_US-lessac");
        assert_eq!(options[1].value, "en_US-lessac");
    }
}
