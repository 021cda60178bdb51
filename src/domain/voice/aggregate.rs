//! Voice Context - 音色快照
//!
//! 音色由外部目录管理，核心只读不写；
//! 每次生成请求拿到的是加载时的不可变快照

use serde::{Deserialize, Serialize};

use super::{Engine, Gender, Quality, VoiceId};

/// 音色快照
///
/// 不变量:
/// - id 在目录内唯一（由目录侧保证）
/// - sample_rate 为正
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub id: VoiceId,
    pub name: String,
    pub engine: Engine,
    /// BCP-47 语言标签，如 `en-US`
    pub language: String,
    pub gender: Gender,
    /// 引擎侧模型标识，可为空（如 espeak 直接用 language）
    #[serde(default)]
    pub model: String,
    /// 多说话人模型的说话人标识（coqui --speaker_idx）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub quality: Quality,
    pub sample_rate: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Voice {
    /// espeak 类引擎在 model 为空时退回语言标签
    pub fn model_or_language(&self) -> &str {
        if self.model.is_empty() {
            &self.language
        } else {
            &self.model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "piper_en_amy",
            "name": "Amy",
            "engine": "piper",
            "language": "en-US",
            "gender": "female",
            "model": "en_US-amy-medium",
            "quality": "medium",
            "sampleRate": 22050
        }"#
    }

    #[test]
    fn test_voice_deserialize() {
        let voice: Voice = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(voice.id.as_str(), "piper_en_amy");
        assert_eq!(voice.engine, Engine::Piper);
        assert_eq!(voice.gender, Gender::Female);
        assert_eq!(voice.sample_rate, 22050);
        // enabled 缺省为 true
        assert!(voice.enabled);
        assert!(voice.speaker.is_none());
    }

    #[test]
    fn test_model_or_language() {
        let mut voice: Voice = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(voice.model_or_language(), "en_US-amy-medium");
        voice.model = String::new();
        assert_eq!(voice.model_or_language(), "en-US");
    }
}
