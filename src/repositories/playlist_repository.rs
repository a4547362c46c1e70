// src/repositories/playlist_repository.rs
//
// Same storage contract as the catalog, over an independent key. Playlists
// hold Program id references only, so this repository knows nothing about
// the Program catalog.

use std::sync::Arc;

use crate::domain::Playlist;
use crate::storage::KeyValueStore;

pub const PLAYLISTS_KEY: &str = "streamflix-playlists";

pub trait PlaylistRepository: Send + Sync {
    fn load(&self) -> Vec<Playlist>;
    fn save(&self, playlists: &[Playlist]);
    fn clear(&self);
}

pub struct KvPlaylistRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPlaylistRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl PlaylistRepository for KvPlaylistRepository {
    fn load(&self) -> Vec<Playlist> {
        let raw = match self.store.get_item(PLAYLISTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read playlists from storage: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(playlists) => playlists,
            Err(e) => {
                log::error!("Stored playlists are not readable, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, playlists: &[Playlist]) {
        let json = match serde_json::to_string(playlists) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize playlists: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set_item(PLAYLISTS_KEY, &json) {
            log::error!("Failed to persist playlists: {}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.store.remove_item(PLAYLISTS_KEY) {
            log::error!("Failed to clear persisted playlists: {}", e);
        }
    }
}
