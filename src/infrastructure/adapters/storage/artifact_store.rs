//! File Artifact Store - 生成产物的文件系统存储
//!
//! 命名: `speech_` + md5(text + voice_id + 时间戳 + 进程内序号) 前 12 位 hex。
//! 时间戳保证重复请求得到不同文件名，序号兜住同一毫秒内的并发请求。
//! 每次成功落盘后同步执行保留清理，目录里最多留下最新的 N 个产物

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ArtifactStorePort, AudioArtifact, AudioStorageError};

/// 保留的产物数量上限
pub const DEFAULT_RETENTION_LIMIT: usize = 200;

/// 参与保留清理的扩展名
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// 文件系统产物存储
pub struct FileArtifactStore {
    audio_dir: PathBuf,
    retention_limit: usize,
    sequence: AtomicU64,
}

impl FileArtifactStore {
    pub fn new(audio_dir: impl AsRef<Path>, retention_limit: usize) -> Self {
        Self {
            audio_dir: audio_dir.as_ref().to_path_buf(),
            retention_limit,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    fn is_audio_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ArtifactStorePort for FileArtifactStore {
    fn allocate(&self, text: &str, voice_id: &str) -> AudioArtifact {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let digest = format!(
            "{:x}",
            md5::compute(format!("{}{}{}{}", text, voice_id, millis, seq))
        );
        let filename = format!("speech_{}.wav", &digest[..12]);
        AudioArtifact {
            path: self.audio_dir.join(&filename),
            filename,
        }
    }

    async fn write(&self, artifact: &AudioArtifact, data: &[u8]) -> Result<(), AudioStorageError> {
        fs::create_dir_all(&self.audio_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;
        fs::write(&artifact.path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            filename = %artifact.filename,
            size = data.len(),
            "Saved audio artifact"
        );
        Ok(())
    }

    async fn is_playable(&self, artifact: &AudioArtifact) -> bool {
        match fs::metadata(&artifact.path).await {
            Ok(meta) => meta.len() > 0,
            Err(_) => false,
        }
    }

    async fn sweep(&self) -> Result<u64, AudioStorageError> {
        let mut entries = match fs::read_dir(&self.audio_dir).await {
            Ok(entries) => entries,
            // 目录还没创建过等价于空目录
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(AudioStorageError::IoError(e.to_string())),
        };

        let mut files: Vec<(PathBuf, SystemTime)> = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if !Self::is_audio_file(&path) {
                continue;
            }
            match entry.metadata().await {
                Ok(meta) => {
                    let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                    files.push((path, mtime));
                }
                // 并发 sweep 可能已经删掉了它
                Err(_) => continue,
            }
        }

        if files.len() <= self.retention_limit {
            return Ok(0);
        }

        // 最新的在前，超出上限的尾部被删除
        files.sort_by(|a, b| b.1.cmp(&a.1));

        let mut deleted = 0u64;
        for (path, _) in files.iter().skip(self.retention_limit) {
            match fs::remove_file(path).await {
                Ok(()) => deleted += 1,
                // 被并发 sweep 抢先删除，不算错误
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete old artifact");
                }
            }
        }

        Ok(deleted)
    }
}
