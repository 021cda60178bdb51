//! Application State

use std::sync::Arc;

use crate::application::ports::{ArtifactStorePort, SpeechEnginePort, VoiceCatalogPort};
use crate::application::GenerateSpeechHandler;

/// 应用状态
pub struct AppState {
    pub catalog: Arc<dyn VoiceCatalogPort>,
    pub generate_handler: GenerateSpeechHandler,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn VoiceCatalogPort>,
        engine: Arc<dyn SpeechEnginePort>,
        store: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            generate_handler: GenerateSpeechHandler::new(catalog.clone(), engine, store),
            catalog,
        }
    }
}
