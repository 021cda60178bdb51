//! Application Layer
//!
//! - Ports: 出站端口（目录、引擎、存储）
//! - Commands: 合成编排

pub mod commands;
pub mod error;
pub mod ports;

pub use commands::{GenerateSpeechCommand, GenerateSpeechHandler, GenerateSpeechResult};
pub use error::ApplicationError;
