//! Artifact Store Port - 生成产物存储抽象
//!
//! 命名、落盘与保留清理

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 一次生成对应的产物槽位
///
/// allocate 时就确定文件名与绝对路径，外部引擎和兜底合成
/// 写的是同一个位置
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// `speech_<12位hex>.wav`
    pub filename: String,
    pub path: PathBuf,
}

/// Artifact Store Port
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// 为一次生成分配碰撞安全的文件名
    ///
    /// 哈希输入含当前时间戳，相同 (text, voice_id) 的重复请求
    /// 也会得到不同的文件名
    fn allocate(&self, text: &str, voice_id: &str) -> AudioArtifact;

    /// 写入产物字节
    async fn write(&self, artifact: &AudioArtifact, data: &[u8]) -> Result<(), AudioStorageError>;

    /// 产物是否存在且非空
    ///
    /// 外部引擎退出码为 0 但没写文件（或写了空文件）时靠这里兜住
    async fn is_playable(&self, artifact: &AudioArtifact) -> bool;

    /// 保留清理：按修改时间保留最新的 N 个，删除其余
    ///
    /// 单个文件删除失败记日志跳过；目录无法读取才返回错误。
    /// 返回删除的文件数
    async fn sweep(&self) -> Result<u64, AudioStorageError>;
}
