//! MySpeech - 文本转语音服务
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录的只读模型
//! - Audio: 兜底合成器与 WAV 编码器（纯函数）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceCatalog, SpeechEngine, ArtifactStore）
//! - Commands: 合成编排（校验 → 引擎 → 兜底 → 落盘 → 保留清理）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 音频静态文件
//! - Adapters: voices.json 目录、外部引擎进程调用、产物文件存储
//!
//! 核心保证：只要请求合法且音色存在，就一定产出可播放的音频——
//! 外部引擎不可用时由过程化兜底合成器顶上

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
