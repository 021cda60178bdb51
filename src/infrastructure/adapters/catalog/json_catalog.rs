//! JSON Voice Catalog - voices.json 目录适配器
//!
//! 启动时加载一次；reload 读文件、建好新快照后整体替换 Arc，
//! 读侧任何时刻看到的都是完整的一代快照

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::application::ports::{CatalogError, VoiceCatalogPort};
use crate::domain::voice::{CatalogFile, VoiceCatalog};

/// voices.json 目录
pub struct JsonVoiceCatalog {
    path: PathBuf,
    snapshot: RwLock<Arc<VoiceCatalog>>,
}

impl JsonVoiceCatalog {
    /// 从文件加载目录；文件缺失或损坏时落到空目录并告警，
    /// 服务仍可启动（所有请求都会得到 VoiceNotFound）
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let snapshot = match Self::read_catalog(&path).await {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    voices = catalog.voices().len(),
                    engines = catalog.engines().len(),
                    "Loaded voice catalog"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load voice catalog, starting empty");
                VoiceCatalog::default()
            }
        };
        Self {
            path,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    async fn read_catalog(path: &Path) -> Result<VoiceCatalog, CatalogError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| CatalogError::IoError(e.to_string()))?;
        let file: CatalogFile =
            serde_json::from_slice(&data).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Ok(VoiceCatalog::from_file(file))
    }
}

#[async_trait]
impl VoiceCatalogPort for JsonVoiceCatalog {
    fn snapshot(&self) -> Arc<VoiceCatalog> {
        self.snapshot.read().expect("catalog lock poisoned").clone()
    }

    async fn reload(&self) -> Result<usize, CatalogError> {
        let catalog = Self::read_catalog(&self.path).await?;
        let count = catalog.voices().len();
        *self.snapshot.write().expect("catalog lock poisoned") = Arc::new(catalog);
        tracing::info!(voices = count, "Voice catalog reloaded");
        Ok(count)
    }
}
