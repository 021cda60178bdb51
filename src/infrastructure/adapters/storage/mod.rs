//! Storage Adapter

mod artifact_store;

pub use artifact_store::{FileArtifactStore, DEFAULT_RETENTION_LIMIT};
