//! Voice Catalog Handlers - 目录只读查询
//!
//! /api/voices, /api/voices/:id, /api/languages, /api/engines

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::infrastructure::http::dto::{
    EngineStat, EnginesResponse, LanguagesResponse, VoiceDetail, VoiceDetailResponse,
    VoicesQuery, VoicesResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /api/voices - 支持 language / engine / gender 过滤
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VoicesQuery>,
) -> Json<VoicesResponse> {
    let snapshot = state.catalog.snapshot();

    let voices: Vec<_> = snapshot
        .voices()
        .iter()
        .filter(|v| match &query.language {
            // 精确匹配或主语言前缀匹配（en 命中 en-US）
            Some(lang) => {
                v.language == *lang || v.language.starts_with(&format!("{}-", lang))
            }
            None => true,
        })
        .filter(|v| match &query.engine {
            Some(engine) => v.engine.as_str() == engine,
            None => true,
        })
        .filter(|v| match &query.gender {
            Some(gender) => v.gender.as_str() == gender,
            None => true,
        })
        .cloned()
        .collect();

    Json(VoicesResponse {
        success: true,
        total: voices.len(),
        voices,
        languages: snapshot.languages().clone(),
        engines: snapshot.engines().clone(),
    })
}

/// GET /api/voices/:id
pub async fn get_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<VoiceDetailResponse>, ApiError> {
    let snapshot = state.catalog.snapshot();

    // 详情端点对禁用音色也可见，和列表保持一致
    let voice = snapshot
        .voices()
        .iter()
        .find(|v| v.id.as_str() == voice_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Voice not found".to_string()))?;

    let engine_info = snapshot.engine_info(voice.engine).cloned();
    let language_info = snapshot.language_info(&voice.language).cloned();

    Ok(Json(VoiceDetailResponse {
        success: true,
        voice: VoiceDetail {
            voice,
            engine_info,
            language_info,
        },
    }))
}

/// GET /api/languages - 按语言聚合
pub async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    let snapshot = state.catalog.snapshot();
    let languages: BTreeMap<_, _> = snapshot
        .language_stats()
        .into_iter()
        .map(|stat| (stat.code.clone(), stat))
        .collect();

    Json(LanguagesResponse {
        success: true,
        total: languages.len(),
        languages,
    })
}

/// GET /api/engines - 引擎清单与音色数
pub async fn list_engines(State(state): State<Arc<AppState>>) -> Json<EnginesResponse> {
    let snapshot = state.catalog.snapshot();
    let engines: BTreeMap<_, _> = snapshot
        .engines()
        .iter()
        .map(|(id, info)| {
            (
                id.clone(),
                EngineStat {
                    id: id.clone(),
                    info: info.clone(),
                    voice_count: snapshot.voice_count_for(id),
                },
            )
        })
        .collect();

    Json(EnginesResponse {
        success: true,
        total: engines.len(),
        engines,
    })
}
