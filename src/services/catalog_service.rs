// src/services/catalog_service.rs
//
// The catalog store: single in-memory source of truth for the ordered
// Program sequence, mirrored to the persistence adapter after every
// mutation and announced on the event bus. One instance is shared by all
// view consumers; tests construct isolated instances over an in-memory
// substrate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::domain::{Program, ProgramStatus, ProgramType, Season};
use crate::error::{AppError, AppResult};
use crate::events::{
    CatalogCleared, CatalogImported, CatalogReordered, EventBus, FeaturedChanged, ProgramAdded,
    ProgramDeleted, ProgramUpdated,
};
use crate::repositories::CatalogRepository;
use crate::services::import_source::ImportSource;

/// Partial update for one Program. `None` leaves a field untouched; for
/// nullable fields the outer `Some(None)` clears the value. The featured
/// flag is deliberately absent; the set/clear-featured operations own it
/// so the at-most-one invariant has a single enforcement point. `id` and
/// `dateAdded` are immutable and not patchable.
#[derive(Debug, Clone, Default)]
pub struct ProgramPatch {
    pub title: Option<String>,
    pub poster: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<Option<String>>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub is_favorite: Option<bool>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub video_url: Option<Option<String>>,
    pub progress: Option<Option<f64>>,
    pub kind: Option<ProgramType>,
    pub seasons: Option<Option<Vec<Season>>>,
    pub total_seasons: Option<Option<u32>>,
    pub total_episodes: Option<Option<u32>>,
    pub status: Option<Option<ProgramStatus>>,
}

impl ProgramPatch {
    fn apply(self, program: &mut Program) {
        if let Some(title) = self.title {
            program.title = title;
        }
        if let Some(poster) = self.poster {
            program.poster = poster;
        }
        if let Some(rating) = self.rating {
            program.rating = rating;
        }
        if let Some(category) = self.category {
            program.category = category;
        }
        if let Some(genre) = self.genre {
            program.genre = genre;
        }
        if let Some(year) = self.year {
            program.year = year;
        }
        if let Some(is_favorite) = self.is_favorite {
            program.is_favorite = is_favorite;
        }
        if let Some(description) = self.description {
            program.description = description;
        }
        if let Some(link) = self.link {
            program.link = link;
        }
        if let Some(video_url) = self.video_url {
            program.video_url = video_url;
        }
        if let Some(progress) = self.progress {
            program.progress = progress;
        }
        if let Some(kind) = self.kind {
            program.kind = kind;
        }
        if let Some(seasons) = self.seasons {
            program.seasons = seasons;
        }
        if let Some(total_seasons) = self.total_seasons {
            program.total_seasons = total_seasons;
        }
        if let Some(total_episodes) = self.total_episodes {
            program.total_episodes = total_episodes;
        }
        if let Some(status) = self.status {
            program.status = status;
        }
    }
}

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    event_bus: Arc<EventBus>,
    programs: RwLock<Vec<Program>>,
}

impl CatalogService {
    /// Load the persisted catalog once; this instance is the source of
    /// truth from here on.
    pub fn new(repo: Arc<dyn CatalogRepository>, event_bus: Arc<EventBus>) -> Self {
        let programs = repo.load();
        Self {
            repo,
            event_bus,
            programs: RwLock::new(programs),
        }
    }

    // ------------------------------------------------------------------
    // Read API
    // ------------------------------------------------------------------

    /// Copy of the ordered catalog; mutating it does not touch the store.
    pub fn get_all(&self) -> Vec<Program> {
        self.programs.read().unwrap().clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Program> {
        self.programs
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Position of the Program in catalog order, `None` when absent.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.programs.read().unwrap().iter().position(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.programs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.read().unwrap().is_empty()
    }

    /// First Program in catalog order carrying the featured flag.
    pub fn get_featured(&self) -> Option<Program> {
        self.programs
            .read()
            .unwrap()
            .iter()
            .find(|p| p.is_featured())
            .cloned()
    }

    /// Sorted distinct genre labels across the catalog; drives the genre
    /// filter.
    pub fn genres(&self) -> Vec<String> {
        let programs = self.programs.read().unwrap();
        let mut genres: Vec<String> = programs
            .iter()
            .map(|p| p.genre.clone())
            .filter(|g| !g.trim().is_empty())
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }

    // ------------------------------------------------------------------
    // Mutations (each persists the full catalog, then announces)
    // ------------------------------------------------------------------

    /// Prepend a fully formed Program. No dedup check: a colliding id is
    /// stored as-is (the import path is where dedup happens).
    pub fn add(&self, program: Program) {
        let (id, title, snapshot) = {
            let mut programs = self.programs.write().unwrap();
            programs.insert(0, program);
            (
                programs[0].id.clone(),
                programs[0].title.clone(),
                programs.clone(),
            )
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(ProgramAdded::new(id, title));
    }

    /// Shallow-merge the patch into the matching Program. Silently a no-op
    /// when the id is unknown.
    pub fn update(&self, id: &str, patch: ProgramPatch) {
        let snapshot = {
            let mut programs = self.programs.write().unwrap();
            let Some(program) = programs.iter_mut().find(|p| p.id == id) else {
                return;
            };
            patch.apply(program);
            programs.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(ProgramUpdated::new(id.to_string()));
    }

    /// Remove by id; no-op when absent.
    pub fn delete(&self, id: &str) {
        let snapshot = {
            let mut programs = self.programs.write().unwrap();
            let before = programs.len();
            programs.retain(|p| p.id != id);
            if programs.len() == before {
                return;
            }
            programs.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(ProgramDeleted::new(id.to_string()));
    }

    /// Move the element at `from` so it lands at `to` (move, not swap);
    /// the relative order of everything else is preserved. Out-of-bounds
    /// indices are clamped or ignored, never a panic.
    pub fn reorder(&self, from: usize, to: usize) {
        let (to, snapshot) = {
            let mut programs = self.programs.write().unwrap();
            if from >= programs.len() {
                return;
            }
            let to = to.min(programs.len() - 1);
            if from == to {
                return;
            }
            let program = programs.remove(from);
            programs.insert(to, program);
            (to, programs.clone())
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(CatalogReordered::new(from, to));
    }

    /// Clear the featured flag everywhere, then set it on the matching
    /// Program. This is the single enforcement point of the at-most-one-featured
    /// invariant. With an unknown id the clearing pass still runs, leaving
    /// no featured Program (matching the historical behavior).
    pub fn set_featured(&self, id: &str) {
        let (featured_id, snapshot) = {
            let mut programs = self.programs.write().unwrap();
            let mut featured_id = None;
            for program in programs.iter_mut() {
                if program.id == id {
                    program.featured = Some(true);
                    featured_id = Some(program.id.clone());
                } else {
                    program.featured = Some(false);
                }
            }
            (featured_id, programs.clone())
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(FeaturedChanged::new(featured_id));
    }

    /// Unset the featured flag on the matching Program only.
    pub fn clear_featured(&self, id: &str) {
        let (featured_id, snapshot) = {
            let mut programs = self.programs.write().unwrap();
            if let Some(program) = programs.iter_mut().find(|p| p.id == id) {
                program.featured = Some(false);
            }
            let featured_id = programs
                .iter()
                .find(|p| p.is_featured())
                .map(|p| p.id.clone());
            (featured_id, programs.clone())
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(FeaturedChanged::new(featured_id));
    }

    /// Empty the catalog (persisted as an empty array).
    pub fn clear_all(&self) {
        let snapshot = {
            let mut programs = self.programs.write().unwrap();
            programs.clear();
            programs.clone()
        };
        self.repo.save(&snapshot);
        self.event_bus.emit(CatalogCleared::new());
    }

    /// Development reset: empty the catalog and remove the persisted value
    /// entirely instead of writing an empty array.
    pub fn reset_to_empty(&self) {
        {
            let mut programs = self.programs.write().unwrap();
            programs.clear();
        }
        self.repo.clear();
        self.event_bus.emit(CatalogCleared::new());
    }

    // ------------------------------------------------------------------
    // Interchange
    // ------------------------------------------------------------------

    /// Write the full catalog, pretty-printed, to
    /// `streamflix-backup-<date>.json` in `dir`. Does not mutate the store.
    pub fn export_snapshot(&self, dir: &Path) -> AppResult<PathBuf> {
        let programs = self.get_all();
        let json = serde_json::to_string_pretty(&programs)?;

        let filename = format!("streamflix-backup-{}.json", Utc::now().format("%Y-%m-%d"));
        let path = dir.join(filename);
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Merge an external backup into the catalog. The payload must be a
    /// JSON array of Programs; anything else rejects with a descriptive
    /// error and leaves the catalog untouched. Incoming Programs whose id
    /// already exists are dropped (first seen wins); survivors are
    /// appended at the end. Returns how many were actually added.
    ///
    /// Only the read suspends; the dedup set is computed after the read
    /// completes, so mutations that ran during the read are respected.
    pub async fn import_merge(&self, source: &dyn ImportSource) -> AppResult<usize> {
        let raw = source.read_text().await?;

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::Import(format!("Import file is not valid JSON: {}", e)))?;
        if !value.is_array() {
            return Err(AppError::Import(
                "Import file does not contain an array of programs".to_string(),
            ));
        }
        let incoming: Vec<Program> = serde_json::from_value(value)
            .map_err(|e| AppError::Import(format!("Import file entries are not programs: {}", e)))?;
        let total_in_file = incoming.len();

        let (added, snapshot) = {
            let mut programs = self.programs.write().unwrap();
            let existing: HashSet<String> = programs.iter().map(|p| p.id.clone()).collect();
            let fresh: Vec<Program> = incoming
                .into_iter()
                .filter(|p| !existing.contains(&p.id))
                .collect();
            let added = fresh.len();
            programs.extend(fresh);
            (added, programs.clone())
        };

        self.repo.save(&snapshot);
        self.event_bus
            .emit(CatalogImported::new(added, total_in_file));
        Ok(added)
    }
}
