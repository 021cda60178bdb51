//! Infrastructure Adapters
//!
//! 出站端口的具体实现：
//! - catalog: voices.json 目录
//! - engine: 外部引擎命令 + 进程调用
//! - storage: 产物文件存储与保留清理

pub mod catalog;
pub mod engine;
pub mod storage;

pub use catalog::JsonVoiceCatalog;
pub use engine::{CommandSpeechEngine, EngineCommandConfig, ProcessInvoker};
pub use storage::{FileArtifactStore, DEFAULT_RETENTION_LIMIT};
