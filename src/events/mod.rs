// src/events/mod.rs
//
// Internal event system. The bus is the observer contract between the core
// and the view layer: services emit typed facts, any number of consumers
// subscribe. EventHandler stays internal to the bus module.

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};
pub use types::{
    CatalogCleared, CatalogImported, CatalogReordered, DomainEvent, FeaturedChanged,
    PlaybackClosed, PlaybackDegraded, PlaybackOpened, PlaybackReady, PlaylistChanged,
    ProgramAdded, ProgramDeleted, ProgramUpdated,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
