//! Registry Context - 音效注册表

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 默认音效资源 URL 前缀
pub const DEFAULT_SOUND_URL_PREFIX: &str = "/sounds/";

/// 音效索引条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundIndexEntry {
    /// 相对音效目录的文件路径
    pub file: String,
}

/// 外部音效索引（主索引 + 别名表）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundIndex {
    /// id -> 文件
    pub index: BTreeMap<String, SoundIndexEntry>,
    /// 别名 -> id
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// 音效注册表 - 小写键到可播放资源路径的映射
///
/// 不变量:
/// - 所有键均为小写
/// - 别名只有在目标 id 存在于主索引时才会被收录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundEffectRegistry {
    entries: HashMap<String, String>,
}

impl SoundEffectRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 直接从 (键, 资源路径) 构建
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, path)| (key.to_lowercase(), path))
                .collect(),
        }
    }

    /// 合并主索引与别名表
    ///
    /// 别名目标按原样（区分大小写）在主索引中查找，找不到的别名被丢弃
    pub fn from_index(index: &SoundIndex, url_prefix: &str) -> Self {
        let mut entries = HashMap::with_capacity(index.index.len() + index.aliases.len());

        for (id, entry) in &index.index {
            entries.insert(id.to_lowercase(), format!("{}{}", url_prefix, entry.file));
        }

        for (name, target) in &index.aliases {
            if let Some(entry) = index.index.get(target) {
                entries.insert(name.to_lowercase(), format!("{}{}", url_prefix, entry.file));
            }
        }

        Self { entries }
    }

    /// 键应已小写
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn asset_path(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有键（排序后）
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
