use uuid::Uuid;

use super::event::EventEnvelope;
use crate::error::StorageError;

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// 1. State is derived from events (not stored directly)
// 2. Commands are validated before emitting events
// 3. Events represent facts that have already happened
// 4. version() always equals the number of applied events
//
// ============================================================================

/// Generic Aggregate trait - all event-sourced aggregates implement this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized + Send + Sync {
    type Event;
    type Command;
    type Error;

    /// Validate a creation command before any state exists
    fn handle_create(command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Create new aggregate from first event
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    fn aggregate_id(&self) -> Uuid;

    /// Current version (sequence number of the last applied event)
    fn version(&self) -> i64;

    /// Rebuild an aggregate from its event history
    fn load_from_events(
        aggregate_id: Uuid,
        events: Vec<EventEnvelope<Self::Event>>,
    ) -> Result<Self, StorageError>
    where
        Self::Error: std::fmt::Display,
    {
        let corrupt = |reason: String| StorageError::CorruptStream { aggregate_id, reason };

        let (first, rest) = events
            .split_first()
            .ok_or_else(|| corrupt("no events to load".to_string()))?;

        let mut aggregate = Self::apply_first_event(&first.event_data)
            .map_err(|e| corrupt(format!("failed to apply first event: {e}")))?;

        for envelope in rest {
            aggregate
                .apply_event(&envelope.event_data)
                .map_err(|e| corrupt(format!("failed to apply event {}: {e}", envelope.sequence_number)))?;
        }

        Ok(aggregate)
    }
}
