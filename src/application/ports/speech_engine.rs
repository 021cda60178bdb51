//! Speech Engine Port - 外部合成引擎抽象
//!
//! 实现方负责把 (文本, 音色) 映射到具体引擎的调用方式。
//! 这个端口被刻意设计成不返回错误：任何失败（没有对应引擎、
//! 进程启动失败、非零退出、超时）都折叠为 false，
//! 由编排方决定是否走兜底合成

use std::path::Path;

use async_trait::async_trait;

use crate::domain::voice::Voice;

/// Speech Engine Port
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 尝试用音色对应的外部引擎合成音频写入 output
    ///
    /// 返回 true 仅表示引擎自称成功；输出文件是否非空由调用方验证
    async fn synthesize(&self, text: &str, voice: &Voice, output: &Path) -> bool;
}
