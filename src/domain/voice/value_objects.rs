//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识
///
/// 目录文件中的稳定 key，如 `coqui_en_vits_ljspeech`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("voice id cannot be empty");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 支持的 TTS 引擎（封闭集合）
///
/// 目录文件中出现的未知引擎名会落到 `Unknown`，
/// 合成时没有对应的外部命令，直接走兜底合成器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Coqui,
    Piper,
    Mozilla,
    Vits,
    Glowtts,
    Fastpitch,
    Tacotron2,
    Mimic3,
    Espeak,
    Opentts,
    #[serde(other)]
    Unknown,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coqui => "coqui",
            Self::Piper => "piper",
            Self::Mozilla => "mozilla",
            Self::Vits => "vits",
            Self::Glowtts => "glowtts",
            Self::Fastpitch => "fastpitch",
            Self::Tacotron2 => "tacotron2",
            Self::Mimic3 => "mimic3",
            Self::Espeak => "espeak",
            Self::Opentts => "opentts",
            Self::Unknown => "unknown",
        }
    }

    /// 各引擎的音色参数（谐波权重 / 噪声底）
    ///
    /// 兜底合成器用它给不同引擎的输出一个可区分的"质感"，
    /// 未知引擎沿用 coqui 的参数
    pub fn timbre(&self) -> Timbre {
        match self {
            Self::Coqui => Timbre::new(0.4, 0.02),
            Self::Piper => Timbre::new(0.35, 0.015),
            Self::Mozilla => Timbre::new(0.4, 0.02),
            Self::Vits => Timbre::new(0.45, 0.018),
            Self::Glowtts => Timbre::new(0.38, 0.02),
            Self::Fastpitch => Timbre::new(0.43, 0.018),
            Self::Tacotron2 => Timbre::new(0.42, 0.022),
            Self::Mimic3 => Timbre::new(0.36, 0.02),
            Self::Espeak => Timbre::new(0.25, 0.03),
            Self::Opentts => Timbre::new(0.38, 0.02),
            Self::Unknown => Timbre::new(0.4, 0.02),
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 兜底合成器的音色参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timbre {
    /// 二次谐波权重（三次谐波取其一半）
    pub harmonic: f32,
    /// 均匀噪声幅度
    pub noise: f32,
}

impl Timbre {
    pub const fn new(harmonic: f32, noise: f32) -> Self {
        Self { harmonic, noise }
    }
}

/// 音色性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Neutral,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Neutral => "neutral",
        }
    }

    /// 基础频率与变化系数（Hz，比例）
    pub fn base_frequency(&self) -> (f32, f32) {
        match self {
            Self::Female => (220.0, 0.2),
            Self::Male => (120.0, 0.15),
            Self::Neutral => (170.0, 0.18),
        }
    }
}

/// 音质档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
    Premium,
}
