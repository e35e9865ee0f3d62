// ============================================================================
// Catalog Domain - Sellable reference data
// ============================================================================

pub mod value_objects;
pub mod catalog;
pub mod custom_blend;

pub use value_objects::*;
pub use catalog::*;
pub use custom_blend::*;
