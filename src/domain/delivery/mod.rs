// ============================================================================
// Delivery Domain - Speed, gift wrap and instructions
// ============================================================================

pub mod value_objects;
pub mod options;

pub use value_objects::*;
pub use options::*;
