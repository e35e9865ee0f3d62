// ============================================================================
// Checkout Domain - Draft assembly and the per-customer session
// ============================================================================

pub mod draft;
pub mod session;

pub use draft::*;
pub use session::*;
