//! Audio Domain - 纯音频算法
//!
//! 兜底合成器与 WAV 编码器，不做任何 I/O

mod fallback;
mod wav;

pub use fallback::{estimate_duration_secs, render_speech};
pub use wav::encode_wav;
