// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// Generic over aggregate and event types. No domain-specific code here.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{envelopes_for, DomainEvent, EventEnvelope};
