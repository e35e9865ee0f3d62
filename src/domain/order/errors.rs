use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Order is already delivered")]
    AlreadyDelivered,

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Tracking details incomplete: {0} is required to ship")]
    IncompleteTracking(&'static str),

    #[error("Order lines cannot be empty")]
    EmptyLines,

    #[error("Invalid line quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Order has already been placed")]
    AlreadyPlaced,

    #[error("Aggregate not initialized")]
    NotInitialized,
}
