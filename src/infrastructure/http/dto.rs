//! Data Transfer Objects
//!
//! 对外 JSON 结构，字段名保持 camelCase

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::GenerateSpeechResult;
use crate::domain::voice::{EngineInfo, LanguageInfo, LanguageStat, Voice};

// ============================================================================
// TTS DTOs
// ============================================================================

/// POST /api/tts 请求体
///
/// 两个字段都必填；用 Option 接住缺失字段，
/// 由 handler 给出明确的 400 而不是框架的 422
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
}

/// POST /api/tts 响应体
#[derive(Debug, Serialize)]
pub struct TtsResponse {
    pub success: bool,
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
    /// 估算时长（秒）
    pub duration: f64,
    pub voice: VoiceSummary,
    pub metadata: TtsMetadata,
}

/// 响应里的音色摘要
#[derive(Debug, Serialize)]
pub struct VoiceSummary {
    pub id: String,
    pub name: String,
    pub engine: String,
    pub language: String,
    pub gender: String,
    pub quality: crate::domain::voice::Quality,
}

#[derive(Debug, Serialize)]
pub struct TtsMetadata {
    #[serde(rename = "textLength")]
    pub text_length: usize,
    #[serde(rename = "sampleRate")]
    pub sample_rate: u32,
    /// ISO-8601
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
}

impl TtsResponse {
    pub fn from_result(result: GenerateSpeechResult) -> Self {
        let voice = result.voice;
        Self {
            success: true,
            audio_url: format!("/audio/{}", result.filename),
            duration: result.duration_secs,
            metadata: TtsMetadata {
                text_length: result.text_length,
                sample_rate: voice.sample_rate,
                generated_at: result.generated_at.to_rfc3339(),
            },
            voice: VoiceSummary {
                id: voice.id.to_string(),
                name: voice.name,
                engine: voice.engine.as_str().to_string(),
                language: voice.language,
                gender: voice.gender.as_str().to_string(),
                quality: voice.quality,
            },
        }
    }
}

// ============================================================================
// Voice Catalog DTOs
// ============================================================================

/// GET /api/voices 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct VoicesQuery {
    pub language: Option<String>,
    pub engine: Option<String>,
    pub gender: Option<String>,
}

/// GET /api/voices 响应体
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub success: bool,
    pub total: usize,
    pub voices: Vec<Voice>,
    pub languages: BTreeMap<String, LanguageInfo>,
    pub engines: BTreeMap<String, EngineInfo>,
}

/// GET /api/voices/:id 响应体
#[derive(Debug, Serialize)]
pub struct VoiceDetailResponse {
    pub success: bool,
    pub voice: VoiceDetail,
}

#[derive(Debug, Serialize)]
pub struct VoiceDetail {
    #[serde(flatten)]
    pub voice: Voice,
    #[serde(rename = "engineInfo", skip_serializing_if = "Option::is_none")]
    pub engine_info: Option<EngineInfo>,
    #[serde(rename = "languageInfo", skip_serializing_if = "Option::is_none")]
    pub language_info: Option<LanguageInfo>,
}

/// GET /api/languages 响应体
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub total: usize,
    pub languages: BTreeMap<String, LanguageStat>,
}

/// GET /api/engines 响应体
#[derive(Debug, Serialize)]
pub struct EnginesResponse {
    pub success: bool,
    pub total: usize,
    pub engines: BTreeMap<String, EngineStat>,
}

#[derive(Debug, Serialize)]
pub struct EngineStat {
    pub id: String,
    #[serde(flatten)]
    pub info: EngineInfo,
    #[serde(rename = "voiceCount")]
    pub voice_count: usize,
}
