//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping        GET   健康检查
//! - /api/tts         POST  文本合成音频
//! - /api/voices      GET   音色列表（language/engine/gender 过滤）
//! - /api/voices/:id  GET   音色详情
//! - /api/languages   GET   语言统计
//! - /api/engines     GET   引擎清单
//! - /audio/*         GET   生成的音频产物（静态文件）

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(audio_dir: impl AsRef<Path>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .nest_service("/audio", ServeDir::new(audio_dir.as_ref()))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/tts", post(handlers::generate_tts))
        .route("/voices", get(handlers::list_voices))
        .route("/voices/:id", get(handlers::get_voice))
        .route("/languages", get(handlers::list_languages))
        .route("/engines", get(handlers::list_engines))
}
