//! TTS Handler - POST /api/tts

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::GenerateSpeechCommand;
use crate::infrastructure::http::dto::{TtsRequest, TtsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn generate_tts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    let text = req
        .text
        .ok_or_else(|| ApiError::BadRequest("Text is required and must be a string".to_string()))?;
    let voice_id = req
        .voice
        .ok_or_else(|| ApiError::BadRequest("Voice id is required".to_string()))?;

    let result = state
        .generate_handler
        .handle(GenerateSpeechCommand {
            text,
            voice_id,
        })
        .await?;

    Ok(Json(TtsResponse::from_result(result)))
}
