//! Voice Bounded Context
//!
//! 音色目录的只读领域模型：快照、值对象、目录视图

mod aggregate;
mod catalog;
mod value_objects;

pub use aggregate::Voice;
pub use catalog::{CatalogFile, EngineInfo, LanguageInfo, LanguageStat, VoiceCatalog};
pub use value_objects::{Engine, Gender, Quality, Timbre, VoiceId};
