//! Configuration Types

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// 外部引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 外部引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// piper ONNX 模型目录
    #[serde(default = "default_piper_model_dir")]
    pub piper_model_dir: PathBuf,

    /// 本地 OpenTTS 守护进程地址
    #[serde(default = "default_opentts_url")]
    pub opentts_url: String,

    /// 默认引擎超时（秒）
    #[serde(default = "default_engine_timeout")]
    pub default_timeout_secs: u64,

    /// 轻量引擎超时（秒）
    #[serde(default = "default_fast_timeout")]
    pub fast_timeout_secs: u64,
}

fn default_piper_model_dir() -> PathBuf {
    PathBuf::from("models/piper")
}

fn default_opentts_url() -> String {
    "http://localhost:5500".to_string()
}

fn default_engine_timeout() -> u64 {
    60
}

fn default_fast_timeout() -> u64 {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            piper_model_dir: default_piper_model_dir(),
            opentts_url: default_opentts_url(),
            default_timeout_secs: default_engine_timeout(),
            fast_timeout_secs: default_fast_timeout(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成产物输出目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 保留的产物数量上限
    #[serde(default = "default_retention_limit")]
    pub retention_limit: usize,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

fn default_retention_limit() -> usize {
    200
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            retention_limit: default_retention_limit(),
        }
    }
}

/// 音色目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// voices.json 路径
    #[serde(default = "default_voices_path")]
    pub voices_path: PathBuf,
}

fn default_voices_path() -> PathBuf {
    PathBuf::from("voices.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            voices_path: default_voices_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
