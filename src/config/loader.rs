//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `TTSPANEL_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `TTSPANEL_POLLER__ACTIVE_INTERVAL_MS=250`
/// - `TTSPANEL_PLAYBACK__BATCH_FORMAT=wav`
/// - `TTSPANEL_SOUNDS__DIR=/srv/sounds`
/// - `TTSPANEL_VOICES__IDS=en_US-lessac,en_GB-alan`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("poller.idle_interval_ms", 600)?
        .set_default("poller.active_interval_ms", 400)?
        .set_default("playback.max_sound_effects", 10)?
        .set_default("playback.batch_format", "mp3")?
        .set_default("sounds.dir", "sounds")?
        .set_default("sounds.url_prefix", "/sounds/")?
        .set_default("rows.max_rows", 200)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 列表值以逗号分隔，例如: TTSPANEL_VOICES__IDS=a,b
    builder = builder.add_source(
        Environment::with_prefix("TTSPANEL")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("voices.ids")
            .with_list_parse_key("sounds.extensions")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.poller.idle_interval_ms == 0 || config.poller.active_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Poller intervals cannot be 0".to_string(),
        ));
    }

    if config.playback.max_sound_effects == 0 {
        return Err(ConfigError::ValidationError(
            "Sound effect cap cannot be 0".to_string(),
        ));
    }

    if config.sounds.url_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "Sound URL prefix cannot be empty".to_string(),
        ));
    }

    if config.rows.max_rows == 0 {
        return Err(ConfigError::ValidationError(
            "Row limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!(
        "Poller: idle {}ms, active {}ms",
        config.poller.idle_interval_ms,
        config.poller.active_interval_ms
    );
    tracing::info!("Sound Effect Cap: {}", config.playback.max_sound_effects);
    tracing::info!("Batch Format: {}", config.playback.batch_format.as_str());
    tracing::info!("Sounds Directory: {:?}", config.sounds.dir);
    tracing::info!("Sounds URL Prefix: {}", config.sounds.url_prefix);
    tracing::info!(
        "Voices: {} ids, {} aliases",
        config.voices.ids.len(),
        config.voices.aliases.len()
    );
    if let Some(voice) = &config.voices.default {
        tracing::info!("Default Voice: {}", voice);
    }
    tracing::info!("Max Rows: {}", config.rows.max_rows);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.poller.idle_interval_ms, 600);
        assert_eq!(config.playback.max_sound_effects, 10);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_interval() {
        let mut config = AppConfig::default();
        config.poller.active_interval_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_cap() {
        let mut config = AppConfig::default();
        config.playback.max_sound_effects = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_url_prefix() {
        let mut config = AppConfig::default();
        config.sounds.url_prefix = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[poller]
active_interval_ms = 250

[voices]
ids = ["en_US-lessac"]
default = "narrator"

[voices.aliases]
narrator = "en_US-lessac"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.poller.active_interval_ms, 250);
        assert_eq!(config.poller.idle_interval_ms, 600);
        assert_eq!(config.voices.default.as_deref(), Some("narrator"));
        assert_eq!(
            config.voices.aliases.get("narrator").map(String::as_str),
            Some("en_US-lessac")
        );
    }
}
