use crate::domain::ids::{AddressId, LineId, OrderId, ProductId};
use crate::domain::order::OrderError;

// ============================================================================
// Checkout Error Taxonomy
// ============================================================================
//
// ValidationError  - bad input shape or range, raised at the boundary
// EmptyCart        - placing an order with no cart lines
// NoAddress        - placing an order with no selected shipping address
// StorageError     - collaborator failure, surfaced unchanged (never retried)
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be blank")]
    BlankField(&'static str),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    #[error("Cart line not found: {0}")]
    UnknownCartLine(LineId),

    #[error("Address not found: {0}")]
    UnknownAddress(AddressId),

    #[error("Product not found in catalog: {0}")]
    UnknownProduct(ProductId),

    #[error("Unknown delivery speed: {0}")]
    UnknownDeliverySpeed(String),

    #[error("Gift message is {len} characters, at most {max} allowed")]
    GiftMessageTooLong { len: usize, max: usize },

    #[error("Delivery instructions are {len} characters, at most {max} allowed")]
    InstructionsTooLong { len: usize, max: usize },

    #[error("Gift message set but gift wrap is off")]
    GiftMessageWithoutGift,

    #[error("Custom blend needs at least one ingredient")]
    EmptyBlend,

    #[error("Blend weight must be positive, got {0}g")]
    InvalidWeight(u32),

    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Order already exists: {0}")]
    DuplicateOrder(OrderId),

    #[error("Concurrency conflict: expected version {expected}, but current is {actual}")]
    VersionConflict { expected: i64, actual: i64 },

    #[error("Corrupt event stream for {aggregate_id}: {reason}")]
    CorruptStream { aggregate_id: uuid::Uuid, reason: String },

    #[error("Write rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    #[error("No shipping address selected")]
    NoAddress,

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl From<OrderError> for CheckoutError {
    fn from(err: OrderError) -> Self {
        Self::Validation(ValidationError::Order(err))
    }
}

impl CheckoutError {
    /// Short label used for metrics and log fields
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::EmptyCart => "empty_cart",
            Self::NoAddress => "no_address",
            Self::Storage(_) => "storage",
        }
    }
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_maps_to_validation() {
        let err: CheckoutError = OrderError::IncompleteTracking("agency").into();
        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationError::Order(OrderError::IncompleteTracking("agency")))
        ));
        assert_eq!(err.reason(), "validation");
    }

    #[test]
    fn test_storage_error_is_surfaced_unchanged() {
        let storage = StorageError::Unavailable("connection reset".to_string());
        let err: CheckoutError = storage.clone().into();
        assert_eq!(err, CheckoutError::Storage(storage));
        assert_eq!(err.reason(), "storage");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::BlankField("city").to_string(),
            "city cannot be blank"
        );
        assert_eq!(
            ValidationError::GiftMessageTooLong { len: 201, max: 200 }.to_string(),
            "Gift message is 201 characters, at most 200 allowed"
        );
        assert_eq!(CheckoutError::NoAddress.to_string(), "No shipping address selected");
    }
}
