// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod import_source;
pub mod playlist_service;

#[cfg(test)]
mod catalog_service_tests;

// Re-export all services and their types
pub use catalog_service::{CatalogService, ProgramPatch};

pub use import_source::{FileImportSource, ImportSource, UrlImportSource};

pub use playlist_service::{PlaylistPatch, PlaylistService};
