// ============================================================================
// Address Domain - Shipping addresses, default flag and checkout selection
// ============================================================================

pub mod value_objects;
pub mod aggregate;

pub use value_objects::*;
pub use aggregate::*;
