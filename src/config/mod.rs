//! Configuration
//!
//! 多源配置：默认值 < config.toml < 环境变量

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{AppConfig, CatalogConfig, EngineConfig, LogConfig, ServerConfig, StorageConfig};
