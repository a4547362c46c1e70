// src/events/bus.rs
//
// Synchronous event bus.
//
// - Handlers execute immediately, in subscription order
// - A panicking handler is contained and logged; the rest still run
// - Every emission is recorded in a bounded in-memory log for debugging

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased handler; downcast to the concrete event type inside.
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

const EVENT_LOG_CAPACITY: usize = 512;

/// Central coordination point between the core services and their
/// consumers. Services emit typed facts; the view layer subscribes without
/// either side depending on the other.
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged emission, kept for debugging and tests
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to one event type. Handlers run in subscription order.
    ///
    /// ```ignore
    /// bus.subscribe::<ProgramAdded, _>(|event| {
    ///     println!("added: {}", event.title);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(Vec::new)
            .push(wrapped);
    }

    /// Emit an event: log it, then run every handler for its type,
    /// synchronously. Handlers observe the store as it is at emission time.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        {
            let mut event_log = self.event_log.write().unwrap();
            if event_log.len() >= EVENT_LOG_CAPACITY {
                event_log.remove(0);
            }
            event_log.push(EventLogEntry {
                event_type: event.event_type().to_string(),
                event_id: event.event_id().to_string(),
                occurred_at: event.occurred_at().to_rfc3339(),
                handler_count,
            });
        }

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            event.event_type(),
            event.event_id(),
            handler_count
        );

        if let Some(event_handlers) = event_handlers {
            for (idx, handler) in event_handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if result.is_err() {
                    log::error!("Handler {} for {} panicked", idx, event.event_type());
                }
            }
        }
    }

    /// Snapshot of the emission log
    pub fn event_log(&self) -> Vec<EventLogEntry> {
        self.event_log.read().unwrap().clone()
    }

    pub fn clear_event_log(&self) {
        self.event_log.write().unwrap().clear();
    }

    /// Number of subscribers for one event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let handlers = self.handlers.read().unwrap();
        handlers.get(&TypeId::of::<E>()).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}
