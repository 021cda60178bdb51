//! Generate Speech - 合成编排
//!
//! 公开操作 generate(text, voiceId)：
//! 校验 → 解析音色 → 尝试外部引擎 → 失败则兜底合成 → 落盘 → 保留清理。
//! 引擎路径与兜底路径对单次请求互斥：只有引擎没有产出有效文件时
//! 才会运行兜底合成器

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStorePort, SpeechEnginePort, VoiceCatalogPort};
use crate::domain::audio::{encode_wav, estimate_duration_secs, render_speech};
use crate::domain::voice::Voice;

/// 文本长度上限（trim 后的字符数）
const MAX_TEXT_CHARS: usize = 5000;

/// 合成命令
#[derive(Debug, Clone)]
pub struct GenerateSpeechCommand {
    pub text: String,
    pub voice_id: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct GenerateSpeechResult {
    pub filename: String,
    pub path: std::path::PathBuf,
    /// 生成时使用的音色快照
    pub voice: Voice,
    /// 估算时长（秒）
    pub duration_secs: f64,
    /// trim 后的字符数
    pub text_length: usize,
    pub generated_at: DateTime<Utc>,
    /// 是否由兜底合成器产出
    pub used_fallback: bool,
}

/// 合成编排器
pub struct GenerateSpeechHandler {
    catalog: Arc<dyn VoiceCatalogPort>,
    engine: Arc<dyn SpeechEnginePort>,
    store: Arc<dyn ArtifactStorePort>,
}

impl GenerateSpeechHandler {
    pub fn new(
        catalog: Arc<dyn VoiceCatalogPort>,
        engine: Arc<dyn SpeechEnginePort>,
        store: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            catalog,
            engine,
            store,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSpeechCommand,
    ) -> Result<GenerateSpeechResult, ApplicationError> {
        let text = cmd.text.trim();
        let text_length = text.chars().count();

        if text_length == 0 {
            return Err(ApplicationError::invalid_input("Text cannot be empty"));
        }
        if text_length > MAX_TEXT_CHARS {
            return Err(ApplicationError::invalid_input(format!(
                "Text exceeds maximum length of {} characters",
                MAX_TEXT_CHARS
            )));
        }
        if cmd.voice_id.trim().is_empty() {
            return Err(ApplicationError::invalid_input("Voice id is required"));
        }

        let snapshot = self.catalog.snapshot();
        let voice = snapshot
            .get(&cmd.voice_id)
            .cloned()
            .ok_or_else(|| ApplicationError::voice_not_found(&cmd.voice_id))?;

        let artifact = self.store.allocate(text, &cmd.voice_id);

        tracing::info!(
            engine = %voice.engine,
            voice = %voice.name,
            filename = %artifact.filename,
            "Generating audio"
        );

        // 引擎退出码为 0 但没写出非空文件也算失败
        let engine_ok = self.engine.synthesize(text, &voice, &artifact.path).await
            && self.store.is_playable(&artifact).await;

        if !engine_ok {
            tracing::info!(
                engine = %voice.engine,
                "Engine unavailable, using fallback synthesizer"
            );
            let samples = render_speech(text, &voice);
            let wav = encode_wav(&samples, voice.sample_rate, 1);
            self.store.write(&artifact, &wav).await?;
        }

        let deleted = self.store.sweep().await?;
        if deleted > 0 {
            tracing::debug!(deleted, "Retention sweep removed old artifacts");
        }

        Ok(GenerateSpeechResult {
            filename: artifact.filename,
            path: artifact.path,
            duration_secs: estimate_duration_secs(text_length),
            text_length,
            generated_at: Utc::now(),
            used_fallback: !engine_ok,
            voice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU64, Ordering};
    use tempfile::TempDir;

    use crate::application::ports::{AudioArtifact, AudioStorageError, CatalogError};
    use crate::domain::voice::{CatalogFile, VoiceCatalog};

    fn test_catalog() -> Arc<VoiceCatalog> {
        let file: CatalogFile = serde_json::from_str(
            r#"{
                "voices": [
                    {"id": "v1", "name": "Voice One", "engine": "coqui", "language": "en-US",
                     "gender": "female", "model": "m", "quality": "high", "sampleRate": 22050}
                ]
            }"#,
        )
        .unwrap();
        Arc::new(VoiceCatalog::from_file(file))
    }

    struct StubCatalog(Arc<VoiceCatalog>);

    #[async_trait]
    impl VoiceCatalogPort for StubCatalog {
        fn snapshot(&self) -> Arc<VoiceCatalog> {
            self.0.clone()
        }

        async fn reload(&self) -> Result<usize, CatalogError> {
            Ok(self.0.voices().len())
        }
    }

    /// 可配置行为的引擎桩：失败 / 假装成功但不写文件 / 真写文件
    enum EngineBehavior {
        Fail,
        ClaimSuccessWriteNothing,
        WriteFile(Vec<u8>),
    }

    struct StubEngine(EngineBehavior);

    #[async_trait]
    impl SpeechEnginePort for StubEngine {
        async fn synthesize(&self, _text: &str, _voice: &Voice, output: &Path) -> bool {
            match &self.0 {
                EngineBehavior::Fail => false,
                EngineBehavior::ClaimSuccessWriteNothing => true,
                EngineBehavior::WriteFile(data) => {
                    std::fs::write(output, data).unwrap();
                    true
                }
            }
        }
    }

    struct StubStore {
        dir: PathBuf,
        writes: AtomicU64,
        sweeps: AtomicU64,
    }

    impl StubStore {
        fn new(dir: &TempDir) -> Self {
            Self {
                dir: dir.path().to_path_buf(),
                writes: AtomicU64::new(0),
                sweeps: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl ArtifactStorePort for StubStore {
        fn allocate(&self, text: &str, voice_id: &str) -> AudioArtifact {
            let digest = format!("{:x}", md5::compute(format!("{}{}", text, voice_id)));
            let filename = format!("speech_{}.wav", &digest[..12]);
            AudioArtifact {
                path: self.dir.join(&filename),
                filename,
            }
        }

        async fn write(
            &self,
            artifact: &AudioArtifact,
            data: &[u8],
        ) -> Result<(), AudioStorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            std::fs::write(&artifact.path, data)
                .map_err(|e| AudioStorageError::IoError(e.to_string()))
        }

        async fn is_playable(&self, artifact: &AudioArtifact) -> bool {
            std::fs::metadata(&artifact.path).map(|m| m.len() > 0).unwrap_or(false)
        }

        async fn sweep(&self) -> Result<u64, AudioStorageError> {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    fn handler(engine: EngineBehavior, store: Arc<StubStore>) -> GenerateSpeechHandler {
        GenerateSpeechHandler::new(
            Arc::new(StubCatalog(test_catalog())),
            Arc::new(StubEngine(engine)),
            store,
        )
    }

    fn command(text: &str) -> GenerateSpeechCommand {
        GenerateSpeechCommand {
            text: text.to_string(),
            voice_id: "v1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fallback_guarantee_when_engine_fails() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store.clone());

        let result = handler.handle(command("Hello world")).await.unwrap();

        assert!(result.used_fallback);
        assert_eq!(result.text_length, 11);
        // floor(22050 * 0.77) = 16978 个样本
        let bytes = std::fs::read(&result.path).unwrap();
        assert_eq!(bytes.len(), 44 + 16978 * 2);
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_engine_claims_success_but_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::ClaimSuccessWriteNothing, store.clone());

        let result = handler.handle(command("verify me")).await.unwrap();

        // 空输出视同失败，兜底必须产出非空文件
        assert!(result.used_fallback);
        let meta = std::fs::metadata(&result.path).unwrap();
        assert!(meta.len() > 44);
    }

    #[tokio::test]
    async fn test_engine_output_is_kept_when_valid() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let payload = b"RIFFengine-made".to_vec();
        let handler = handler(EngineBehavior::WriteFile(payload.clone()), store.clone());

        let result = handler.handle(command("real engine")).await.unwrap();

        assert!(!result.used_fallback);
        assert_eq!(std::fs::read(&result.path).unwrap(), payload);
        // 兜底路径没有运行
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_voice_produces_no_writes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store.clone());

        let err = handler
            .handle(GenerateSpeechCommand {
                text: "hello".to_string(),
                voice_id: "nope".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::VoiceNotFound(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store);

        for text in ["", "   ", "\n\t"] {
            let err = handler.handle(command(text)).await.unwrap_err();
            assert!(matches!(err, ApplicationError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_overlong_text_rejected() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store);

        let err = handler.handle(command(&"x".repeat(5001))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));

        // 正好 5000 字符是合法的
        assert!(handler.handle(command(&"x".repeat(5000))).await.is_ok());
    }

    #[tokio::test]
    async fn test_text_is_trimmed_before_validation() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store);

        let result = handler.handle(command("  hi  ")).await.unwrap();
        assert_eq!(result.text_length, 2);
    }

    #[tokio::test]
    async fn test_missing_voice_id_rejected() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(StubStore::new(&dir));
        let handler = handler(EngineBehavior::Fail, store);

        let err = handler
            .handle(GenerateSpeechCommand {
                text: "hello".to_string(),
                voice_id: "  ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }
}
