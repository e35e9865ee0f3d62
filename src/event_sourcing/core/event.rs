use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Event Envelope - Event Metadata
// ============================================================================
//
// Wraps domain events with identity, ordering and timing metadata.
//
// ============================================================================

/// Generic Event Envelope - wraps any domain event with metadata
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,
    pub aggregate_id: Uuid,
    pub sequence_number: i64,

    // Event Type Information
    pub event_type: String,
    pub event_version: i32,

    // Event Payload
    pub event_data: E,

    // Groups the events written by one command
    pub correlation_id: Uuid,

    pub timestamp: DateTime<Utc>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(aggregate_id: Uuid, sequence_number: i64, event_data: E, correlation_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            aggregate_id,
            sequence_number,
            event_type: event_data.event_type().to_string(),
            event_version: E::event_version(),
            event_data,
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// All domain events must implement this trait to be used with the event store.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn event_type(&self) -> &'static str;

    fn event_version() -> i32 {
        1
    }
}

/// Wrap domain events into envelopes numbered after `current_version`
pub fn envelopes_for<E: DomainEvent>(
    aggregate_id: Uuid,
    current_version: i64,
    events: Vec<E>,
    correlation_id: Uuid,
) -> Vec<EventEnvelope<E>> {
    events
        .into_iter()
        .zip(current_version + 1..)
        .map(|(event, seq)| EventEnvelope::new(aggregate_id, seq, event, correlation_id))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
