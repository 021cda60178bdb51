//! Voice Context - 目录快照
//!
//! voices.json 加载后的不可变视图；重载时整体替换，不做原地修改

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Engine, Voice};

/// 引擎元信息（目录文件中的描述性字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 语言元信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    #[serde(default, rename = "nativeName")]
    pub native_name: String,
}

/// voices.json 的文件结构
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub voices: Vec<Voice>,
    #[serde(default)]
    pub engines: BTreeMap<String, EngineInfo>,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageInfo>,
}

/// 每种语言的统计信息（/api/languages 用）
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStat {
    pub code: String,
    pub name: String,
    #[serde(rename = "nativeName")]
    pub native_name: String,
    #[serde(rename = "voiceCount")]
    pub voice_count: usize,
    pub engines: Vec<String>,
}

/// 音色目录快照
///
/// 不变量:
/// - index 只包含 enabled 的音色，合成请求查不到被禁用的音色
/// - voices 保留目录文件的原始顺序（含禁用项，用于列表展示）
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    engines: BTreeMap<String, EngineInfo>,
    languages: BTreeMap<String, LanguageInfo>,
    index: HashMap<String, usize>,
}

impl VoiceCatalog {
    pub fn from_file(file: CatalogFile) -> Self {
        let mut index = HashMap::with_capacity(file.voices.len());
        for (pos, voice) in file.voices.iter().enumerate() {
            if voice.enabled {
                index.insert(voice.id.as_str().to_string(), pos);
            }
        }
        Self {
            voices: file.voices,
            engines: file.engines,
            languages: file.languages,
            index,
        }
    }

    /// 按 id 查找可用音色；禁用或不存在都返回 None
    pub fn get(&self, voice_id: &str) -> Option<&Voice> {
        self.index.get(voice_id).map(|&pos| &self.voices[pos])
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn engines(&self) -> &BTreeMap<String, EngineInfo> {
        &self.engines
    }

    pub fn languages(&self) -> &BTreeMap<String, LanguageInfo> {
        &self.languages
    }

    pub fn engine_info(&self, engine: Engine) -> Option<&EngineInfo> {
        self.engines.get(engine.as_str())
    }

    /// 语言元信息；`en-US` 查不到时退回主标签 `en`
    pub fn language_info(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.get(code).or_else(|| {
            let primary = code.split('-').next()?;
            self.languages.get(primary)
        })
    }

    /// 按语言聚合音色数与引擎列表
    pub fn language_stats(&self) -> Vec<LanguageStat> {
        let mut stats: BTreeMap<&str, LanguageStat> = BTreeMap::new();
        for voice in &self.voices {
            let entry = stats.entry(&voice.language).or_insert_with(|| {
                let info = self.language_info(&voice.language);
                LanguageStat {
                    code: voice.language.clone(),
                    name: info.map(|i| i.name.clone()).unwrap_or_default(),
                    native_name: info.map(|i| i.native_name.clone()).unwrap_or_default(),
                    voice_count: 0,
                    engines: Vec::new(),
                }
            });
            entry.voice_count += 1;
            let engine = voice.engine.as_str().to_string();
            if !entry.engines.contains(&engine) {
                entry.engines.push(engine);
            }
        }
        stats.into_values().collect()
    }

    /// 指定引擎下的音色数
    pub fn voice_count_for(&self, engine: &str) -> usize {
        self.voices
            .iter()
            .filter(|v| v.engine.as_str() == engine)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_json() -> &'static str {
        r#"{
            "voices": [
                {"id": "a", "name": "A", "engine": "coqui", "language": "en-US",
                 "gender": "female", "model": "m1", "quality": "high", "sampleRate": 22050},
                {"id": "b", "name": "B", "engine": "piper", "language": "en-GB",
                 "gender": "male", "model": "m2", "quality": "medium", "sampleRate": 16000},
                {"id": "c", "name": "C", "engine": "espeak", "language": "de",
                 "gender": "neutral", "quality": "low", "sampleRate": 22050, "enabled": false}
            ],
            "engines": {
                "coqui": {"name": "Coqui TTS"},
                "piper": {"name": "Piper"}
            },
            "languages": {
                "en": {"name": "English", "nativeName": "English"},
                "de": {"name": "German", "nativeName": "Deutsch"}
            }
        }"#
    }

    fn load() -> VoiceCatalog {
        let file: CatalogFile = serde_json::from_str(catalog_json()).unwrap();
        VoiceCatalog::from_file(file)
    }

    #[test]
    fn test_get_enabled_voice() {
        let catalog = load();
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_disabled_voice_not_resolvable() {
        let catalog = load();
        assert!(catalog.get("c").is_none());
        // 列表中仍然可见
        assert_eq!(catalog.voices().len(), 3);
    }

    #[test]
    fn test_language_info_falls_back_to_primary_tag() {
        let catalog = load();
        let info = catalog.language_info("en-US").unwrap();
        assert_eq!(info.name, "English");
        assert!(catalog.language_info("fr").is_none());
    }

    #[test]
    fn test_language_stats() {
        let catalog = load();
        let stats = catalog.language_stats();
        assert_eq!(stats.len(), 3);
        let en_us = stats.iter().find(|s| s.code == "en-US").unwrap();
        assert_eq!(en_us.voice_count, 1);
        assert_eq!(en_us.engines, vec!["coqui".to_string()]);
        assert_eq!(en_us.name, "English");
    }

    #[test]
    fn test_voice_count_for_engine() {
        let catalog = load();
        assert_eq!(catalog.voice_count_for("piper"), 1);
        assert_eq!(catalog.voice_count_for("vits"), 0);
    }
}
