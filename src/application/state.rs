// src/application/state.rs
//
// Composition root. Wires the storage substrate through the repositories
// into the services sharing one event bus. The view layer holds one
// AppState for the lifetime of the page/session and creates a
// PlaybackSession per open player overlay.

use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::player::{PlaybackSession, SessionConfig};
use crate::repositories::{KvCatalogRepository, KvPlaylistRepository};
use crate::services::{CatalogService, PlaylistService};
use crate::storage::{KeyValueStore, SqliteKeyValueStore};

pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub catalog: Arc<CatalogService>,
    pub playlists: Arc<PlaylistService>,
}

impl AppState {
    /// Open the default on-disk store and wire everything up.
    pub fn new() -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::open_default()?);
        Ok(Self::with_store(store))
    }

    /// Wire services over an injected substrate (tests, embedding).
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let event_bus = Arc::new(create_event_bus());

        let catalog = Arc::new(CatalogService::new(
            Arc::new(KvCatalogRepository::new(store.clone())),
            event_bus.clone(),
        ));
        let playlists = Arc::new(PlaylistService::new(
            Arc::new(KvPlaylistRepository::new(store)),
            event_bus.clone(),
        ));

        Self {
            event_bus,
            catalog,
            playlists,
        }
    }

    /// A fresh playback session bound to this state's event bus.
    pub fn new_playback_session(&self) -> PlaybackSession {
        PlaybackSession::new(self.event_bus.clone(), SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProgramDraft;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn services_share_one_substrate() {
        let state = AppState::with_store(Arc::new(MemoryKeyValueStore::new()));

        let program = ProgramDraft {
            title: "Heat".to_string(),
            ..ProgramDraft::default()
        }
        .build()
        .unwrap();
        let id = program.id.clone();
        state.catalog.add(program);

        let playlist_id = state.playlists.create("Noir".to_string(), None);
        state.playlists.add_program(&playlist_id, &id);

        let resolved = state
            .playlists
            .resolve_programs(&playlist_id, &state.catalog);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].title, "Heat");
    }
}
