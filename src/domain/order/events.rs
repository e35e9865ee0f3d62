use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::delivery::DeliveryOptions;
use crate::domain::ids::{AddressId, CustomerId, OrderId};
use crate::domain::pricing::OrderPricing;
use crate::event_sourcing::core::DomainEvent;

use super::aggregate::Order;
use super::value_objects::{OrderLine, OrderStatus, TrackingInfo};

// ============================================================================
// Order Events - Facts in an order's lifecycle
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Processing(OrderProcessing),
    Shipped(OrderShipped),
    Delivered(OrderDelivered),
    Cancelled(OrderCancelled),
}

impl OrderEvent {
    /// Status the order is in after this event
    pub fn resulting_status(&self) -> OrderStatus {
        match self {
            Self::Placed(_) => OrderStatus::Pending,
            Self::Processing(_) => OrderStatus::Processing,
            Self::Shipped(_) => OrderStatus::Shipped,
            Self::Delivered(_) => OrderStatus::Delivered,
            Self::Cancelled(_) => OrderStatus::Cancelled,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Placed(e) => e.placed_at,
            Self::Processing(e) => e.started_at,
            Self::Shipped(e) => e.shipped_at,
            Self::Delivered(e) => e.delivered_at,
            Self::Cancelled(e) => e.cancelled_at,
        }
    }
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Placed(_) => "OrderPlaced",
            Self::Processing(_) => "OrderProcessing",
            Self::Shipped(_) => "OrderShipped",
            Self::Delivered(_) => "OrderDelivered",
            Self::Cancelled(_) => "OrderCancelled",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - immutable snapshot of cart, address, options and pricing
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub address_id: AddressId,
    pub delivery: DeliveryOptions,
    pub pricing: OrderPricing,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderPlaced {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            customer_id: order.customer_id(),
            lines: order.lines().to_vec(),
            address_id: order.address_id(),
            delivery: order.delivery().clone(),
            pricing: *order.pricing(),
            placed_at: order.created_at(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderProcessing {
    pub started_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderShipped {
    pub tracking: TrackingInfo,
    pub shipped_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelivered {
    pub delivered_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderCancelled {
    pub cancelled_from: OrderStatus,
    pub cancelled_at: DateTime<Utc>,
}
