//! Configuration Loader
//!
//! 优先级（从高到低）：
//! 1. 环境变量（前缀 `MYSPEECH_`，层级分隔符 `__`）
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
/// # 环境变量示例
/// - `MYSPEECH_SERVER__PORT=8080`
/// - `MYSPEECH_STORAGE__AUDIO_DIR=/data/audio`
/// - `MYSPEECH_ENGINE__OPENTTS_URL=http://opentts:5500`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5100)?
        .set_default("engine.piper_model_dir", "models/piper")?
        .set_default("engine.opentts_url", "http://localhost:5500")?
        .set_default("engine.default_timeout_secs", 60)?
        .set_default("engine.fast_timeout_secs", 30)?
        .set_default("storage.audio_dir", "data/audio")?
        .set_default("storage.retention_limit", 200)?
        .set_default("catalog.voices_path", "voices.json")?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    builder = builder.add_source(
        Environment::with_prefix("MYSPEECH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.storage.retention_limit == 0 {
        return Err(ConfigError::ValidationError(
            "Retention limit cannot be 0".to_string(),
        ));
    }

    if config.engine.default_timeout_secs == 0 || config.engine.fast_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Engine timeout cannot be 0".to_string(),
        ));
    }

    if config.catalog.voices_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice catalog path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（启动日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Voice Catalog: {:?}", config.catalog.voices_path);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Retention Limit: {}", config.storage.retention_limit);
    tracing::info!(
        "Engine Timeouts: {}s / {}s (fast)",
        config.engine.default_timeout_secs,
        config.engine.fast_timeout_secs
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
