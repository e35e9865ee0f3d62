use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};

// ============================================================================
// Generic Event Store - Repository for Events
// ============================================================================
//
// In-process, append-only event streams keyed by aggregate id.
//
// Responsibilities:
// 1. Append events (append-only, sequence numbers contiguous from 1)
// 2. Load event history for aggregates
// 3. Ensure optimistic concurrency control
//
// ============================================================================

pub struct EventStore<E: DomainEvent> {
    aggregate_type_name: String, // e.g., "Order"
    streams: RwLock<HashMap<Uuid, Vec<EventEnvelope<E>>>>,
}

impl<E: DomainEvent> EventStore<E> {
    pub fn new(aggregate_type_name: &str) -> Self {
        Self {
            aggregate_type_name: aggregate_type_name.to_string(),
            streams: RwLock::new(HashMap::new()),
        }
    }

    /// Append events to the event store.
    /// Returns the new version number after appending.
    pub async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64, StorageError> {
        if events.is_empty() {
            return Err(StorageError::Rejected("cannot append empty event list".to_string()));
        }

        let mut streams = self.streams.write().await;
        let stream = streams.entry(aggregate_id).or_default();

        // Check optimistic concurrency
        let current_version = stream.len() as i64;
        if current_version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: current_version,
            });
        }

        let mut new_version = expected_version;
        for envelope in &events {
            new_version += 1;
            if envelope.aggregate_id != aggregate_id || envelope.sequence_number != new_version {
                return Err(StorageError::Rejected(format!(
                    "event {} out of sequence for {}",
                    envelope.sequence_number, aggregate_id
                )));
            }
        }

        let event_count = events.len();
        stream.extend(events);

        tracing::info!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            new_version = new_version,
            event_count = event_count,
            "✅ Appended events to event store"
        );

        Ok(new_version)
    }

    /// Load all events for an aggregate, oldest first
    pub async fn load_events(&self, aggregate_id: Uuid) -> Vec<EventEnvelope<E>> {
        let streams = self.streams.read().await;
        let events = streams.get(&aggregate_id).cloned().unwrap_or_default();

        tracing::debug!("Loaded {} events for aggregate {}", events.len(), aggregate_id);
        events
    }

    /// Current version of an aggregate, 0 when it has no events
    pub async fn get_current_version(&self, aggregate_id: Uuid) -> i64 {
        let streams = self.streams.read().await;
        streams.get(&aggregate_id).map_or(0, |s| s.len() as i64)
    }

    /// Load aggregate from events, `None` when the stream is empty
    pub async fn load_aggregate<A>(&self, aggregate_id: Uuid) -> Result<Option<A>, StorageError>
    where
        A: Aggregate<Event = E>,
        A::Error: std::fmt::Display,
    {
        let events = self.load_events(aggregate_id).await;

        if events.is_empty() {
            return Ok(None);
        }

        A::load_from_events(aggregate_id, events).map(Some)
    }

    pub async fn aggregate_exists(&self, aggregate_id: Uuid) -> bool {
        self.get_current_version(aggregate_id).await > 0
    }

    /// Ids of every aggregate with at least one event
    pub async fn aggregate_ids(&self) -> Vec<Uuid> {
        let streams = self.streams.read().await;
        streams
            .iter()
            .filter(|(_, events)| !events.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
