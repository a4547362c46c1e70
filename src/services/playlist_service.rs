// src/services/playlist_service.rs
//
// Playlists are a loose catalog-of-catalogs: id references into the
// Program catalog with no referential integrity. Dangling references are
// skipped at resolution time, never repaired.

use std::sync::{Arc, RwLock};

use crate::domain::{Playlist, Program};
use crate::events::{EventBus, PlaylistChanged};
use crate::repositories::PlaylistRepository;
use crate::services::catalog_service::CatalogService;

/// Partial update for one Playlist. Membership changes go through
/// `add_program`/`remove_program`.
#[derive(Debug, Clone, Default)]
pub struct PlaylistPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

pub struct PlaylistService {
    repo: Arc<dyn PlaylistRepository>,
    event_bus: Arc<EventBus>,
    playlists: RwLock<Vec<Playlist>>,
}

impl PlaylistService {
    pub fn new(repo: Arc<dyn PlaylistRepository>, event_bus: Arc<EventBus>) -> Self {
        let playlists = repo.load();
        Self {
            repo,
            event_bus,
            playlists: RwLock::new(playlists),
        }
    }

    pub fn get_all(&self) -> Vec<Playlist> {
        self.playlists.read().unwrap().clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Playlist> {
        self.playlists
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn create(&self, name: String, description: Option<String>) -> String {
        let playlist = Playlist::new(name, description);
        let id = playlist.id.clone();
        let snapshot = {
            let mut playlists = self.playlists.write().unwrap();
            playlists.push(playlist);
            playlists.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(PlaylistChanged::new(id.clone()));
        id
    }

    pub fn update(&self, id: &str, patch: PlaylistPatch) {
        let snapshot = {
            let mut playlists = self.playlists.write().unwrap();
            let Some(playlist) = playlists.iter_mut().find(|p| p.id == id) else {
                return;
            };
            if let Some(name) = patch.name {
                playlist.name = name;
            }
            if let Some(description) = patch.description {
                playlist.description = description;
            }
            if let Some(color) = patch.color {
                playlist.color = color;
            }
            playlist.touch();
            playlists.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(PlaylistChanged::new(id.to_string()));
    }

    pub fn delete(&self, id: &str) {
        let snapshot = {
            let mut playlists = self.playlists.write().unwrap();
            let before = playlists.len();
            playlists.retain(|p| p.id != id);
            if playlists.len() == before {
                return;
            }
            playlists.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(PlaylistChanged::new(id.to_string()));
    }

    /// Append a Program reference; a no-op when the playlist is unknown or
    /// already holds the id. The Program itself is never checked; a
    /// reference may dangle.
    pub fn add_program(&self, playlist_id: &str, program_id: &str) {
        let snapshot = {
            let mut playlists = self.playlists.write().unwrap();
            let Some(playlist) = playlists.iter_mut().find(|p| p.id == playlist_id) else {
                return;
            };
            if playlist.contains(program_id) {
                return;
            }
            playlist.program_ids.push(program_id.to_string());
            playlist.touch();
            playlists.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus
            .emit(PlaylistChanged::new(playlist_id.to_string()));
    }

    pub fn remove_program(&self, playlist_id: &str, program_id: &str) {
        let snapshot = {
            let mut playlists = self.playlists.write().unwrap();
            let Some(playlist) = playlists.iter_mut().find(|p| p.id == playlist_id) else {
                return;
            };
            let before = playlist.program_ids.len();
            playlist.program_ids.retain(|id| id != program_id);
            if playlist.program_ids.len() == before {
                return;
            }
            playlist.touch();
            playlists.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus
            .emit(PlaylistChanged::new(playlist_id.to_string()));
    }

    /// The playlist's Programs in playlist order. References that no
    /// longer resolve in the catalog are skipped.
    pub fn resolve_programs(&self, playlist_id: &str, catalog: &CatalogService) -> Vec<Program> {
        let Some(playlist) = self.get_by_id(playlist_id) else {
            return Vec::new();
        };
        playlist
            .program_ids
            .iter()
            .filter_map(|id| catalog.get_by_id(id))
            .collect()
    }
}
