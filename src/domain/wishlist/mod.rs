// ============================================================================
// Wishlist Domain - Saved products and move-to-cart
// ============================================================================

pub mod aggregate;

pub use aggregate::*;
