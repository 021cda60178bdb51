//! HTTP Handlers

mod ping;
mod tts;
mod voice;

pub use ping::ping;
pub use tts::generate_tts;
pub use voice::{get_voice, list_engines, list_languages, list_voices};
