//! Application Ports
//!
//! 应用层依赖的出站端口，具体实现在 infrastructure/adapters

mod artifact_store;
mod speech_engine;
mod voice_catalog;

pub use artifact_store::{ArtifactStorePort, AudioArtifact, AudioStorageError};
pub use speech_engine::SpeechEnginePort;
pub use voice_catalog::{CatalogError, VoiceCatalogPort};
