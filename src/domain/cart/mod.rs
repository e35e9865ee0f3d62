// ============================================================================
// Cart Domain - Lines, quantities and subtotal
// ============================================================================

pub mod value_objects;
pub mod aggregate;

pub use value_objects::*;
pub use aggregate::*;
