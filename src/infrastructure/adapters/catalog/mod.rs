//! Catalog Adapter

mod json_catalog;

pub use json_catalog::JsonVoiceCatalog;
