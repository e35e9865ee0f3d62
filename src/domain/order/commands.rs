use crate::domain::delivery::DeliveryOptions;
use crate::domain::ids::{AddressId, CustomerId, OrderId};
use crate::domain::pricing::OrderPricing;

use super::errors::OrderError;
use super::value_objects::{OrderLine, OrderStatus, TrackingInfo};

// ============================================================================
// Order Commands - Represent user and admin intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    PlaceOrder {
        order_id: OrderId,
        customer_id: CustomerId,
        lines: Vec<OrderLine>,
        address_id: AddressId,
        delivery: DeliveryOptions,
        pricing: OrderPricing,
    },
    StartProcessing,
    ShipOrder {
        tracking: Option<TrackingInfo>,
    },
    DeliverOrder,
    CancelOrder,
}

impl OrderCommand {
    /// Map an admin status selection onto the command that performs it.
    /// `pending` is only ever entered by placing an order.
    pub fn for_status(
        from: OrderStatus,
        to: OrderStatus,
        tracking: Option<TrackingInfo>,
    ) -> Result<Self, OrderError> {
        match to {
            OrderStatus::Pending => Err(OrderError::InvalidTransition { from, to }),
            OrderStatus::Processing => Ok(Self::StartProcessing),
            OrderStatus::Shipped => Ok(Self::ShipOrder { tracking }),
            OrderStatus::Delivered => Ok(Self::DeliverOrder),
            OrderStatus::Cancelled => Ok(Self::CancelOrder),
        }
    }
}
