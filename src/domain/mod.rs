// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Synchronous, pure checkout logic. Each area has its own subdirectory with
// value objects and the aggregate that owns them. The order workflow is
// event sourced on top of the generic infrastructure in src/event_sourcing.
//
// ============================================================================

pub mod ids;
pub mod catalog;
pub mod cart;
pub mod address;
pub mod delivery;
pub mod pricing;
pub mod order;
pub mod checkout;
pub mod wishlist;
