//! 应用层错误定义
//!
//! 只有三类错误会到达调用方：输入非法、音色不存在、存储失败。
//! 引擎不可用（spawn 失败 / 超时 / 空输出）由兜底合成器内部消化，
//! 永远不会以错误形式向外传播。

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求输入非法（文本缺失 / 为空 / 超长 / 缺少音色 id）
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 音色不存在或已禁用
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// 兜底路径无法落盘，或保留清理无法读取目录
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn voice_not_found(voice_id: impl Into<String>) -> Self {
        Self::VoiceNotFound(voice_id.into())
    }
}

impl From<crate::application::ports::AudioStorageError> for ApplicationError {
    fn from(err: crate::application::ports::AudioStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}
