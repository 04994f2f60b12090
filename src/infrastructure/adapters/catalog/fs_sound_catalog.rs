//! Filesystem Sound Catalog - 扫描本地音效目录
//!
//! 实现 SoundCatalogPort trait

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{CatalogError, SoundCatalogPort};
use crate::domain::registry::{SoundIndex, SoundIndexEntry};

/// 默认识别的音效扩展名
pub const DEFAULT_SOUND_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// 音效目录配置
#[derive(Debug, Clone)]
pub struct FsSoundCatalogConfig {
    /// 音效根目录
    pub dir: PathBuf,
    /// 识别的扩展名（不区分大小写）
    pub extensions: Vec<String>,
    /// 别名 -> 音效 ID
    pub aliases: BTreeMap<String, String>,
}

impl FsSoundCatalogConfig {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions: DEFAULT_SOUND_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            aliases: BTreeMap::new(),
        }
    }
}

/// 文件系统音效目录
///
/// 音效 ID 为文件名（不含扩展名），file 为相对根目录的路径（`/` 分隔）
pub struct FsSoundCatalog {
    config: FsSoundCatalogConfig,
}

impl FsSoundCatalog {
    pub fn new(config: FsSoundCatalogConfig) -> Self {
        Self { config }
    }

    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// 递归收集音效文件（按路径排序）
    async fn collect_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let mut files = Vec::new();
        let mut pending = vec![self.config.dir.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound && dir == self.config.dir => {
                    tracing::debug!(dir = %dir.display(), "Sound directory missing");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && self.has_known_extension(&path) {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn relative_file(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.config.dir).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

#[async_trait]
impl SoundCatalogPort for FsSoundCatalog {
    async fn fetch_sound_index(&self) -> Result<SoundIndex, CatalogError> {
        let mut index = SoundIndex {
            index: BTreeMap::new(),
            aliases: self.config.aliases.clone(),
        };

        for path in self.collect_files().await? {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(file) = self.relative_file(&path) else {
                continue;
            };
            if index.index.contains_key(id) {
                tracing::warn!(id = %id, file = %file, "Duplicate sound id, keeping first");
                continue;
            }
            index
                .index
                .insert(id.to_string(), SoundIndexEntry { file });
        }

        tracing::debug!(
            dir = %self.config.dir.display(),
            sounds = index.index.len(),
            aliases = index.aliases.len(),
            "Sound index scanned"
        );
        Ok(index)
    }
}
