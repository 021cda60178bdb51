//! Voice Catalog Port - 音色目录抽象
//!
//! 目录由外部维护，核心只读快照；重载以原子替换实现

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::VoiceCatalog;

/// 目录加载错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Voice Catalog Port
///
/// 快照读取无锁竞争；reload 整体换掉快照，读侧不会看到中间状态
#[async_trait]
pub trait VoiceCatalogPort: Send + Sync {
    /// 当前目录快照
    fn snapshot(&self) -> Arc<VoiceCatalog>;

    /// 重新加载目录，返回加载的音色数
    async fn reload(&self) -> Result<usize, CatalogError>;
}
