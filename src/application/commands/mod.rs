//! Application Commands

mod generate_speech;

pub use generate_speech::{GenerateSpeechCommand, GenerateSpeechHandler, GenerateSpeechResult};
