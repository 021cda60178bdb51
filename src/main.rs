//! MySpeech - 文本转语音服务

use std::sync::Arc;

use myspeech::config::{load_config, print_config};
use myspeech::infrastructure::adapters::{
    CommandSpeechEngine, EngineCommandConfig, FileArtifactStore, JsonVoiceCatalog,
};
use myspeech::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},myspeech={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("MySpeech - TTS 服务");
    print_config(&config);

    // 确保输出目录存在
    tokio::fs::create_dir_all(&config.storage.audio_dir).await?;

    // 加载音色目录（启动时一次性快照）
    let catalog = Arc::new(JsonVoiceCatalog::load(&config.catalog.voices_path).await);

    // 外部引擎 + 进程调用器
    let engine = Arc::new(CommandSpeechEngine::new(EngineCommandConfig {
        piper_model_dir: config.engine.piper_model_dir.clone(),
        opentts_url: config.engine.opentts_url.clone(),
        default_timeout_secs: config.engine.default_timeout_secs,
        fast_timeout_secs: config.engine.fast_timeout_secs,
    }));

    // 产物存储（落盘 + 保留清理）
    let store = Arc::new(FileArtifactStore::new(
        &config.storage.audio_dir,
        config.storage.retention_limit,
    ));

    let state = AppState::new(catalog, engine, store);

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state, config.storage.audio_dir.clone());

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
