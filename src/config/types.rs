//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::render::AudioFormat;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 队列轮询配置
    #[serde(default)]
    pub poller: PollerConfig,

    /// 播放配置
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// 音效目录配置
    #[serde(default)]
    pub sounds: SoundsConfig,

    /// 音色目录配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 面板行配置
    #[serde(default)]
    pub rows: RowsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 队列轮询配置
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// 轮询关闭时的检查间隔（毫秒）
    #[serde(default = "default_idle_interval_ms")]
    pub idle_interval_ms: u64,

    /// 轮询开启时的检查间隔（毫秒）
    #[serde(default = "default_active_interval_ms")]
    pub active_interval_ms: u64,
}

fn default_idle_interval_ms() -> u64 {
    600
}

fn default_active_interval_ms() -> u64 {
    400
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            idle_interval_ms: default_idle_interval_ms(),
            active_interval_ms: default_active_interval_ms(),
        }
    }
}

impl PollerConfig {
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    pub fn active_interval(&self) -> Duration {
        Duration::from_millis(self.active_interval_ms)
    }
}

/// 播放配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackSettings {
    /// 单次解析最多识别的音效数
    #[serde(default = "default_max_sound_effects")]
    pub max_sound_effects: usize,

    /// 批量请求输出格式
    /// 可选: mp3, wav
    #[serde(default)]
    pub batch_format: AudioFormat,
}

fn default_max_sound_effects() -> usize {
    10
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            max_sound_effects: default_max_sound_effects(),
            batch_format: AudioFormat::Mp3,
        }
    }
}

/// 音效目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct SoundsConfig {
    /// 音效文件根目录
    #[serde(default = "default_sounds_dir")]
    pub dir: PathBuf,

    /// 音效资源 URL 前缀
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// 识别的文件扩展名
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// 别名 -> 音效 ID
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

fn default_sounds_dir() -> PathBuf {
    PathBuf::from("sounds")
}

fn default_url_prefix() -> String {
    "/sounds/".to_string()
}

fn default_extensions() -> Vec<String> {
    ["mp3", "wav", "ogg", "m4a"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for SoundsConfig {
    fn default() -> Self {
        Self {
            dir: default_sounds_dir(),
            url_prefix: default_url_prefix(),
            extensions: default_extensions(),
            aliases: BTreeMap::new(),
        }
    }
}

/// 音色目录配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoicesConfig {
    /// 可用音色 ID
    #[serde(default)]
    pub ids: Vec<String>,

    /// 别名 -> 音色 ID
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// 启动时默认选中的音色
    #[serde(default)]
    pub default: Option<String>,
}

/// 面板行配置
#[derive(Debug, Clone, Deserialize)]
pub struct RowsConfig {
    /// 最多保留的行数，超出时丢弃最旧的
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    200
}

impl Default for RowsConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
