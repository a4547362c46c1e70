// src/repositories/catalog_repository.rs
//
// Durable storage of the whole Program catalog as one JSON array under a
// fixed key. Cold start (no prior value) and corrupt data both degrade to
// an empty catalog; a failed write leaves in-memory state ahead of the
// persisted state until the next successful save.

use std::sync::Arc;

use crate::domain::Program;
use crate::storage::KeyValueStore;

/// Fixed storage key, kept stable for existing catalogs.
pub const PROGRAMS_KEY: &str = "streamflix-programs";

pub trait CatalogRepository: Send + Sync {
    /// The persisted catalog, or empty when absent/unreadable. Never fails.
    fn load(&self) -> Vec<Program>;

    /// Overwrite the persisted catalog with the given sequence. Failures
    /// are logged and swallowed.
    fn save(&self, programs: &[Program]);

    /// Remove the persisted value entirely.
    fn clear(&self);
}

pub struct KvCatalogRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvCatalogRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl CatalogRepository for KvCatalogRepository {
    fn load(&self) -> Vec<Program> {
        let raw = match self.store.get_item(PROGRAMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read catalog from storage: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(programs) => programs,
            Err(e) => {
                log::error!("Stored catalog is not readable, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, programs: &[Program]) {
        let json = match serde_json::to_string(programs) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize catalog: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set_item(PROGRAMS_KEY, &json) {
            log::error!("Failed to persist catalog: {}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.store.remove_item(PROGRAMS_KEY) {
            log::error!("Failed to clear persisted catalog: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProgramDraft;
    use crate::error::{AppError, AppResult};
    use crate::storage::MemoryKeyValueStore;

    fn repo() -> (Arc<MemoryKeyValueStore>, KvCatalogRepository) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = KvCatalogRepository::new(store.clone());
        (store, repo)
    }

    fn program(title: &str) -> Program {
        ProgramDraft {
            title: title.to_string(),
            ..ProgramDraft::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn cold_start_loads_empty() {
        let (_, repo) = repo();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, repo) = repo();
        let programs = vec![program("Heat"), program("Ran")];
        repo.save(&programs);
        assert_eq!(repo.load(), programs);
    }

    #[test]
    fn corrupt_value_degrades_to_empty() {
        let (store, repo) = repo();
        store.set_item(PROGRAMS_KEY, "{not json").unwrap();
        assert!(repo.load().is_empty());

        store.set_item(PROGRAMS_KEY, r#"{"an":"object"}"#).unwrap();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn clear_removes_persisted_value() {
        let (store, repo) = repo();
        repo.save(&[program("Heat")]);
        repo.clear();
        assert_eq!(store.get_item(PROGRAMS_KEY).unwrap(), None);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get_item(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::Other("read failed".to_string()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Other("quota exceeded".to_string()))
        }
        fn remove_item(&self, _key: &str) -> AppResult<()> {
            Err(AppError::Other("remove failed".to_string()))
        }
    }

    #[test]
    fn substrate_failures_never_escape() {
        let repo = KvCatalogRepository::new(Arc::new(FailingStore));
        assert!(repo.load().is_empty());
        repo.save(&[program("Heat")]);
        repo.clear();
    }
}
