//! Engine Adapter - 外部引擎调用
//!
//! command: 引擎 → 命令模板的封闭映射
//! invoker: 带超时的进程执行

mod command;
mod invoker;

pub use command::{build_command, EngineCommand, EngineCommandConfig};
pub use invoker::ProcessInvoker;

use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::SpeechEnginePort;
use crate::domain::voice::Voice;

/// 基于外部命令的合成引擎
///
/// SpeechEnginePort 的唯一生产实现：查模板 → 执行 → 报告成败
pub struct CommandSpeechEngine {
    config: EngineCommandConfig,
    invoker: ProcessInvoker,
}

impl CommandSpeechEngine {
    pub fn new(config: EngineCommandConfig) -> Self {
        Self {
            config,
            invoker: ProcessInvoker::new(),
        }
    }
}

#[async_trait]
impl SpeechEnginePort for CommandSpeechEngine {
    async fn synthesize(&self, text: &str, voice: &Voice, output: &Path) -> bool {
        let Some(command) = build_command(text, voice, output, &self.config) else {
            tracing::debug!(engine = %voice.engine, "No command template for engine");
            return false;
        };

        tracing::debug!(
            engine = %voice.engine,
            program = %command.program,
            timeout_secs = command.timeout.as_secs(),
            "Invoking engine"
        );

        if command.stdout_to_file {
            self.invoker.invoke_capturing(command, output).await
        } else {
            self.invoker.invoke(command).await
        }
    }
}
