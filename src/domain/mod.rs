//! Domain Layer
//!
//! - Voice Context: 音色目录的只读模型
//! - Audio: 兜底合成与 WAV 容器编码（纯函数）

pub mod audio;
pub mod voice;
