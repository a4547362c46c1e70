// src/repositories/mod.rs
//
// Persistence layer
//
// CRITICAL RULES:
// - Repositories are DUMB persistence adapters
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - The whole collection is one JSON value under one key; every save is a
//   full overwrite (last full write wins)
// - Load and save never fail the caller: failures are logged and degraded

pub mod catalog_repository;
pub mod playlist_repository;

pub use catalog_repository::{CatalogRepository, KvCatalogRepository, PROGRAMS_KEY};
pub use playlist_repository::{KvPlaylistRepository, PlaylistRepository, PLAYLISTS_KEY};
