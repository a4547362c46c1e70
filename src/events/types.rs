// src/events/types.rs
//
// All domain events in the system. Each event is an immutable fact that
// has already occurred and carries only the data needed to react to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($ty:ident) => {
        impl DomainEvent for $ty {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($ty)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a Program is added to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub program_id: String,
    pub title: String,
}

impl ProgramAdded {
    pub fn new(program_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            program_id,
            title,
        }
    }
}

impl_domain_event!(ProgramAdded);

/// Emitted when an existing Program is patched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub program_id: String,
}

impl ProgramUpdated {
    pub fn new(program_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            program_id,
        }
    }
}

impl_domain_event!(ProgramUpdated);

/// Emitted when a Program is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub program_id: String,
}

impl ProgramDeleted {
    pub fn new(program_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            program_id,
        }
    }
}

impl_domain_event!(ProgramDeleted);

/// Emitted when a catalog entry is moved to a new position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReordered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub from_index: usize,
    pub to_index: usize,
}

impl CatalogReordered {
    pub fn new(from_index: usize, to_index: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            from_index,
            to_index,
        }
    }
}

impl_domain_event!(CatalogReordered);

/// Emitted when the featured designation changes. `program_id` is `None`
/// when no program remains featured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub program_id: Option<String>,
}

impl FeaturedChanged {
    pub fn new(program_id: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            program_id,
        }
    }
}

impl_domain_event!(FeaturedChanged);

/// Emitted when the whole catalog is emptied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl CatalogCleared {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for CatalogCleared {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(CatalogCleared);

/// Emitted after an import merge completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogImported {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Programs actually appended (duplicates by id are dropped)
    pub added: usize,
    /// Records in the imported file
    pub total_in_file: usize,
}

impl CatalogImported {
    pub fn new(added: usize, total_in_file: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            added,
            total_in_file,
        }
    }
}

impl_domain_event!(CatalogImported);

/// Emitted on any playlist mutation (create, update, delete, membership)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub playlist_id: String,
}

impl PlaylistChanged {
    pub fn new(playlist_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            playlist_id,
        }
    }
}

impl_domain_event!(PlaylistChanged);

// ============================================================================
// PLAYBACK EVENTS
// ============================================================================

/// Emitted when a playback session opens with a classified source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackOpened {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    /// Classified strategy label: "youtube", "google-drive", "archive",
    /// or "direct"
    pub strategy: String,
}

impl PlaybackOpened {
    pub fn new(title: String, strategy: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
            strategy,
        }
    }
}

impl_domain_event!(PlaybackOpened);

/// Emitted when a session reaches Ready
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackReady {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub strategy: String,
}

impl PlaybackReady {
    pub fn new(strategy: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            strategy,
        }
    }
}

impl_domain_event!(PlaybackReady);

/// Emitted when the provider-load timer elapses without a load signal.
/// Loading feedback is dismissed; nothing further is forced on the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackDegraded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub strategy: String,
}

impl PlaybackDegraded {
    pub fn new(strategy: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            strategy,
        }
    }
}

impl_domain_event!(PlaybackDegraded);

/// Emitted when the user dismisses the player overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackClosed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl PlaybackClosed {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for PlaybackClosed {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(PlaybackClosed);
