//! Fallback Synthesizer - 过程化兜底合成器
//!
//! 没有任何外部依赖，任何引擎不可用时都能产出结构合法的音频。
//! 输出不是可懂的语音，而是带音节包络和谐波结构的波形，
//! 长度与频率特征由 (文本, 音色) 决定，仅噪声项是随机的。

use std::f32::consts::PI;

use rand::Rng;

use crate::domain::voice::Voice;

/// 每个字符贡献的时长（秒）
const SECS_PER_CHAR: f64 = 0.07;
/// 音频时长上限（秒）
const MAX_DURATION_SECS: f64 = 30.0;
/// 音节包络周期（秒）
const SYLLABLE_SECS: f32 = 0.12;
/// 颤音频率（Hz）与深度
const VIBRATO_HZ: f32 = 5.5;
const VIBRATO_DEPTH: f32 = 0.08;
/// 混音后的整体余量
const HEADROOM: f32 = 0.5;

/// 估算时长（秒）：`min(字符数 * 0.07, 30)`
///
/// 响应里返回的 duration 与兜底合成的实际时长都用这个公式
pub fn estimate_duration_secs(char_count: usize) -> f64 {
    (char_count as f64 * SECS_PER_CHAR).min(MAX_DURATION_SECS)
}

/// 根据文本与音色渲染 PCM16 样本
///
/// 调用方保证 text 非空（入口已做校验），sample_rate 为正
pub fn render_speech(text: &str, voice: &Voice) -> Vec<i16> {
    let chars: Vec<char> = text.chars().collect();
    let sample_rate = voice.sample_rate;
    let duration = estimate_duration_secs(chars.len());
    let num_samples = (sample_rate as f64 * duration).floor() as usize;

    let (base_freq, variation) = voice.gender.base_frequency();
    let timbre = voice.engine.timbre();

    let mut rng = rand::thread_rng();
    let mut samples = Vec::with_capacity(num_samples);

    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;

        // 以 4 字符/秒 的速度扫过文本，用当前字符的码点调制频率
        let char_index = ((t * 4.0) as usize) % chars.len();
        let char_code = chars[char_index] as u32;
        let char_mod = (char_code as f32 - 65.0) / 100.0;

        let freq = base_freq * (1.0 + char_mod * variation);

        let fundamental = (2.0 * PI * freq * t).sin();
        let harmonic2 = (2.0 * PI * freq * 2.0 * t).sin() * timbre.harmonic;
        let harmonic3 = (2.0 * PI * freq * 3.0 * t).sin() * (timbre.harmonic * 0.5);

        // 每 0.12s 一个半正弦窗，模拟音节节奏
        let envelope = (PI * ((t % SYLLABLE_SECS) / SYLLABLE_SECS)).sin() * 0.6;

        let vibrato = (2.0 * PI * VIBRATO_HZ * t).sin() * VIBRATO_DEPTH;

        let mut sample = (fundamental + harmonic2 + harmonic3) * envelope * (1.0 + vibrato);
        sample += (rng.gen::<f32>() - 0.5) * timbre.noise;

        let sample = (sample * HEADROOM).clamp(-1.0, 1.0);
        samples.push((sample * 32767.0).floor() as i16);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{Engine, Gender, Quality, VoiceId};

    fn voice(sample_rate: u32, gender: Gender, engine: Engine) -> Voice {
        Voice {
            id: VoiceId::new("test_voice").unwrap(),
            name: "Test".to_string(),
            engine,
            language: "en-US".to_string(),
            gender,
            model: String::new(),
            speaker: None,
            quality: Quality::Medium,
            sample_rate,
            enabled: true,
        }
    }

    #[test]
    fn test_sample_count_matches_duration_formula() {
        // 11 个字符，22050 Hz: duration = 0.77s, floor(22050 * 0.77) = 16978
        let voice = voice(22050, Gender::Female, Engine::Coqui);
        let samples = render_speech("Hello world", &voice);
        assert_eq!(samples.len(), 16978);
    }

    #[test]
    fn test_duration_capped_at_30_seconds() {
        let voice = voice(8000, Gender::Male, Engine::Piper);
        let long_text = "a".repeat(5000);
        let samples = render_speech(&long_text, &voice);
        assert_eq!(samples.len(), 8000 * 30);
    }

    #[test]
    fn test_estimate_duration() {
        assert!((estimate_duration_secs(11) - 0.77).abs() < 1e-9);
        assert_eq!(estimate_duration_secs(5000), 30.0);
    }

    #[test]
    fn test_output_is_not_silence() {
        let voice = voice(16000, Gender::Neutral, Engine::Espeak);
        let samples = render_speech("some spoken words", &voice);
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 1000, "expected audible signal, peak was {}", peak);
    }

    #[test]
    fn test_headroom_keeps_amplitude_in_bounds() {
        // 噪声项是随机的，只断言结构性质：所有样本都在 i16 范围内
        // 且混音经过 0.5 余量缩放后不会顶满量程
        let voice = voice(22050, Gender::Female, Engine::Vits);
        let samples = render_speech("amplitude bounds check", &voice);
        assert!(samples.iter().all(|&s| s > -32768));
    }

    #[test]
    fn test_length_deterministic_across_runs() {
        let voice = voice(22050, Gender::Male, Engine::Tacotron2);
        let a = render_speech("same text", &voice);
        let b = render_speech("same text", &voice);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_multibyte_text_counts_characters_not_bytes() {
        // 5 个汉字 = 15 字节，时长应按 5 个字符计算
        let voice = voice(22050, Gender::Female, Engine::Coqui);
        let samples = render_speech("你好世界呀", &voice);
        let expected = (22050.0_f64 * estimate_duration_secs(5)).floor() as usize;
        assert_eq!(samples.len(), expected);
    }
}
