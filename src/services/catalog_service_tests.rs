// src/services/catalog_service_tests.rs
//
// Catalog store behavior: ordering, featured designation, persistence
// mirroring, and the import/export interchange paths.

#[cfg(test)]
mod catalog_tests {
    use std::sync::Arc;

    use crate::domain::{Program, ProgramDraft};
    use crate::error::AppError;
    use crate::events::{create_event_bus, EventBus};
    use crate::repositories::{CatalogRepository, KvCatalogRepository, PROGRAMS_KEY};
    use crate::services::catalog_service::{CatalogService, ProgramPatch};
    use crate::services::import_source::MockImportSource;
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};

    fn service() -> (Arc<MemoryKeyValueStore>, Arc<EventBus>, CatalogService) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let bus = Arc::new(create_event_bus());
        let repo = Arc::new(KvCatalogRepository::new(store.clone()));
        let service = CatalogService::new(repo, bus.clone());
        (store, bus, service)
    }

    fn program(title: &str) -> Program {
        ProgramDraft {
            title: title.to_string(),
            ..ProgramDraft::default()
        }
        .build()
        .unwrap()
    }

    fn titles(service: &CatalogService) -> Vec<String> {
        service.get_all().into_iter().map(|p| p.title).collect()
    }

    #[test]
    fn add_prepends() {
        let (_, _, service) = service();
        service.add(program("First"));
        service.add(program("Second"));
        assert_eq!(titles(&service), vec!["Second", "First"]);
    }

    #[test]
    fn add_does_not_dedup_ids() {
        let (_, _, service) = service();
        let a = program("Heat");
        let mut b = program("Heat copy");
        b.id = a.id.clone();
        service.add(a);
        service.add(b);
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn get_all_is_a_defensive_copy() {
        let (_, _, service) = service();
        service.add(program("Heat"));
        let mut copy = service.get_all();
        copy.clear();
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let (_, _, service) = service();
        let p = program("Heat");
        let id = p.id.clone();
        service.add(p);

        service.update(
            &id,
            ProgramPatch {
                rating: Some(9.1),
                video_url: Some(Some("https://example.com/heat.mp4".to_string())),
                ..ProgramPatch::default()
            },
        );

        let updated = service.get_by_id(&id).unwrap();
        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.rating, 9.1);
        assert_eq!(
            updated.video_url.as_deref(),
            Some("https://example.com/heat.mp4")
        );

        // Explicit clear through the nested option
        service.update(
            &id,
            ProgramPatch {
                video_url: Some(None),
                ..ProgramPatch::default()
            },
        );
        assert_eq!(service.get_by_id(&id).unwrap().video_url, None);
    }

    #[test]
    fn seasons_change_through_whole_program_replacement() {
        let (_, _, service) = service();
        let mut draft = ProgramDraft {
            title: "The Wire".to_string(),
            ..ProgramDraft::default()
        };
        draft.kind = Some(crate::domain::ProgramType::Series);
        let series = draft.build().unwrap();
        let id = series.id.clone();
        service.add(series);

        // The caller reads the seasons, produces a new array, and sends it
        // back whole.
        let mut seasons = service.get_by_id(&id).unwrap().seasons.unwrap();
        seasons[0].episodes[0].watched = true;
        service.update(
            &id,
            ProgramPatch {
                seasons: Some(Some(seasons)),
                ..ProgramPatch::default()
            },
        );

        let updated = service.get_by_id(&id).unwrap();
        assert!(updated.seasons.unwrap()[0].episodes[0].watched);
    }

    #[test]
    fn update_unknown_id_is_a_silent_no_op() {
        let (_, _, service) = service();
        service.add(program("Heat"));
        let before = service.get_all();
        service.update(
            "missing",
            ProgramPatch {
                rating: Some(1.0),
                ..ProgramPatch::default()
            },
        );
        assert_eq!(service.get_all(), before);
    }

    #[test]
    fn delete_removes_matching_program() {
        let (_, _, service) = service();
        let p = program("Heat");
        let id = p.id.clone();
        service.add(p);
        service.add(program("Ran"));

        service.delete(&id);
        assert_eq!(service.len(), 1);
        assert!(service.get_by_id(&id).is_none());
    }

    #[test]
    fn delete_nonexistent_id_leaves_catalog_unchanged() {
        let (_, _, service) = service();
        service.add(program("Heat"));
        let before = service.get_all();
        service.delete("missing");
        assert_eq!(service.get_all(), before);
    }

    #[test]
    fn index_of_finds_position() {
        let (_, _, service) = service();
        let a = program("A");
        let id = a.id.clone();
        service.add(a);
        service.add(program("B"));

        // B was prepended, so A sits at index 1
        assert_eq!(service.index_of(&id), Some(1));
        assert_eq!(service.index_of("missing"), None);
    }

    #[test]
    fn reorder_moves_and_preserves_relative_order() {
        let (_, _, service) = service();
        for title in ["D", "C", "B", "A"] {
            service.add(program(title));
        }
        assert_eq!(titles(&service), vec!["A", "B", "C", "D"]);

        service.reorder(0, 2);
        assert_eq!(titles(&service), vec!["B", "C", "A", "D"]);

        service.reorder(3, 0);
        assert_eq!(titles(&service), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn reorder_out_of_bounds_never_panics() {
        let (_, _, service) = service();
        service.reorder(0, 3); // empty catalog

        service.add(program("B"));
        service.add(program("A"));

        service.reorder(7, 0); // from out of range: no-op
        assert_eq!(titles(&service), vec!["A", "B"]);

        service.reorder(0, 99); // to out of range: clamped to the end
        assert_eq!(titles(&service), vec!["B", "A"]);
    }

    #[test]
    fn at_most_one_featured_after_any_sequence() {
        let (_, _, service) = service();
        let a = program("A");
        let b = program("B");
        let (id_a, id_b) = (a.id.clone(), b.id.clone());
        service.add(a);
        service.add(b);

        let featured_count = |s: &CatalogService| {
            s.get_all().iter().filter(|p| p.is_featured()).count()
        };

        service.set_featured(&id_a);
        assert_eq!(featured_count(&service), 1);
        assert_eq!(service.get_featured().unwrap().id, id_a);

        service.set_featured(&id_b);
        assert_eq!(featured_count(&service), 1);
        assert_eq!(service.get_featured().unwrap().id, id_b);

        service.clear_featured(&id_b);
        assert_eq!(featured_count(&service), 0);
        assert!(service.get_featured().is_none());
    }

    #[test]
    fn set_featured_with_unknown_id_clears_everything() {
        let (_, _, service) = service();
        let a = program("A");
        let id_a = a.id.clone();
        service.add(a);
        service.set_featured(&id_a);

        service.set_featured("missing");
        assert!(service.get_featured().is_none());
    }

    #[test]
    fn mutations_are_mirrored_to_storage() {
        let (store, _, service) = service();
        let p = program("Heat");
        let id = p.id.clone();
        service.add(p);
        service.set_featured(&id);

        // A second instance over the same substrate sees the same catalog.
        let repo = Arc::new(KvCatalogRepository::new(store.clone()));
        let reloaded = CatalogService::new(repo, Arc::new(create_event_bus()));
        assert_eq!(reloaded.get_all(), service.get_all());
    }

    #[test]
    fn clear_all_persists_an_empty_catalog() {
        let (store, _, service) = service();
        service.add(program("Heat"));
        service.clear_all();
        assert!(service.is_empty());
        assert_eq!(store.get_item(PROGRAMS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn reset_to_empty_removes_the_persisted_key() {
        let (store, _, service) = service();
        service.add(program("Heat"));
        service.reset_to_empty();
        assert!(service.is_empty());
        assert_eq!(store.get_item(PROGRAMS_KEY).unwrap(), None);
    }

    #[test]
    fn genres_are_distinct_and_sorted() {
        let (_, _, service) = service();
        for (title, genre) in [("A", "Thriller"), ("B", "Drama"), ("C", "Thriller")] {
            let mut p = program(title);
            p.genre = genre.to_string();
            service.add(p);
        }
        assert_eq!(service.genres(), vec!["Drama", "Thriller"]);
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    fn import_json(programs: &[Program]) -> String {
        serde_json::to_string(programs).unwrap()
    }

    fn mock_source(payload: String) -> MockImportSource {
        let mut source = MockImportSource::new();
        source
            .expect_read_text()
            .returning(move || Ok(payload.clone()));
        source
    }

    #[tokio::test]
    async fn import_appends_only_new_ids() {
        let (_, _, service) = service();
        let existing = program("Existing");
        service.add(existing.clone());

        let mut duplicate = program("Duplicate of existing");
        duplicate.id = existing.id.clone();
        let fresh_a = program("Fresh A");
        let fresh_b = program("Fresh B");

        let payload = import_json(&[duplicate, fresh_a.clone(), fresh_b.clone()]);
        let added = service
            .import_merge(&mock_source(payload))
            .await
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(
            titles(&service),
            vec!["Existing", "Fresh A", "Fresh B"]
        );
        // The existing record was not merged over
        assert_eq!(
            service.get_by_id(&existing.id).unwrap().title,
            "Existing"
        );
    }

    #[tokio::test]
    async fn import_of_all_duplicates_adds_nothing() {
        let (_, _, service) = service();
        let a = program("A");
        let b = program("B");
        service.add(a.clone());
        service.add(b.clone());
        let before = service.get_all();

        let payload = import_json(&[a, b]);
        let added = service
            .import_merge(&mock_source(payload))
            .await
            .unwrap();

        assert_eq!(added, 0);
        assert_eq!(service.get_all(), before);
    }

    #[tokio::test]
    async fn import_rejects_non_array_payload() {
        let (_, _, service) = service();
        service.add(program("Heat"));
        let before = service.get_all();

        let result = service
            .import_merge(&mock_source(r#"{"not":"an array"}"#.to_string()))
            .await;

        match result {
            Err(AppError::Import(msg)) => assert!(msg.contains("array")),
            other => panic!("expected import rejection, got {:?}", other),
        }
        assert_eq!(service.get_all(), before);
    }

    #[tokio::test]
    async fn import_rejects_unparseable_payload() {
        let (_, _, service) = service();
        let result = service
            .import_merge(&mock_source("{broken".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::Import(_))));
        assert!(service.is_empty());
    }

    #[tokio::test]
    async fn import_propagates_read_failures() {
        let (_, _, service) = service();
        let mut source = MockImportSource::new();
        source
            .expect_read_text()
            .returning(|| Err(AppError::Import("Failed to read import file".to_string())));

        let result = service.import_merge(&source).await;
        assert!(matches!(result, Err(AppError::Import(_))));
    }

    /// A mutation that lands while the import file is being read must be
    /// visible to the dedup check, which runs after the read completes.
    #[tokio::test]
    async fn import_dedup_sees_mutations_made_during_the_read() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let bus = Arc::new(create_event_bus());
        let repo = Arc::new(KvCatalogRepository::new(store));
        let service = Arc::new(CatalogService::new(repo, bus));

        let racing = program("Added mid-read");
        let payload = import_json(&[racing.clone()]);

        struct InterleavingSource {
            service: Arc<CatalogService>,
            racing: Program,
            payload: String,
        }

        #[async_trait::async_trait]
        impl crate::services::import_source::ImportSource for InterleavingSource {
            async fn read_text(&self) -> crate::error::AppResult<String> {
                // Simulates the user mutating the catalog while the file
                // read is in flight.
                self.service.add(self.racing.clone());
                Ok(self.payload.clone())
            }
        }

        let source = InterleavingSource {
            service: service.clone(),
            racing,
            payload,
        };

        let added = service.import_merge(&source).await.unwrap();
        assert_eq!(added, 0);
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn export_writes_dated_pretty_snapshot() {
        let (_, _, service) = service();
        let mut p = program("X");
        p.rating = 9.0;
        let id = p.id.clone();
        service.add(p);
        service.set_featured(&id);
        assert_eq!(service.get_featured().unwrap().id, id);

        let dir = tempfile::TempDir::new().unwrap();
        let path = service.export_snapshot(dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("streamflix-backup-"));
        assert!(name.ends_with(".json"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let exported: Vec<Program> = serde_json::from_str(&contents).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].title, "X");
        assert!(exported[0].is_featured());

        // Export is read-only with respect to the store
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn round_trip_preserves_programs_deeply() {
        let (store, _, service) = service();
        let mut series = ProgramDraft {
            title: "The Wire".to_string(),
            ..ProgramDraft::default()
        };
        series.kind = Some(crate::domain::ProgramType::Series);
        service.add(series.build().unwrap());
        service.add(program("Heat"));

        let repo = KvCatalogRepository::new(store);
        assert_eq!(repo.load(), service.get_all());
    }
}
