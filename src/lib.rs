// src/lib.rs
// StreamVault - Local-first media catalog manager core
//
// Architecture:
// - Domain-centric: entity shapes and invariants live in domain modules
// - Event-driven: services announce facts on a synchronous bus
// - Explicit: no implicit behavior, no hidden persistence
// - Local-first: the whole catalog lives in the user's own storage
//
// The view layer (cards, carousels, dialogs, player chrome) is an external
// consumer of this crate: it reads through the services, mutates through
// their operations, and subscribes to the bus.

pub mod application;
pub mod domain;
pub mod error;
pub mod events;
pub mod player;
pub mod repositories;
pub mod services;
pub mod storage;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_program,
    // Program and sub-entities
    Episode,
    Playlist,
    Program,
    ProgramDraft,
    ProgramStatus,
    ProgramType,
    Season,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    CatalogCleared,
    CatalogImported,
    CatalogReordered,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FeaturedChanged,
    PlaybackClosed,
    PlaybackDegraded,
    PlaybackOpened,
    PlaybackReady,
    PlaylistChanged,
    ProgramAdded,
    ProgramDeleted,
    ProgramUpdated,
};

// ============================================================================
// PUBLIC API - Storage & Repositories
// ============================================================================

pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

pub use repositories::{
    CatalogRepository,
    KvCatalogRepository,
    KvPlaylistRepository,
    PlaylistRepository,
    PLAYLISTS_KEY,
    PROGRAMS_KEY,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Catalog store
    CatalogService,
    // Import sources
    FileImportSource,
    ImportSource,
    // Playlists
    PlaylistPatch,
    PlaylistService,
    ProgramPatch,
    UrlImportSource,
};

// ============================================================================
// PUBLIC API - Player
// ============================================================================

pub use player::{PlaybackSession, PlaybackState, SessionConfig, SourceResolver, VideoSource};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
