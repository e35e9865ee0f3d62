use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::delivery::DeliveryOptions;
use crate::domain::ids::{AddressId, CustomerId, OrderId};
use crate::domain::pricing::OrderPricing;
use crate::event_sourcing::core::Aggregate;

use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::*;
use super::value_objects::{OrderLine, OrderStatus, TrackingInfo};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// Lines, address, delivery options and pricing are fixed by the Placed event.
// Later events only move the status (and attach tracking on shipment).
//
//   pending -> processing -> shipped -> delivered
//      \___________\____________\______> cancelled
//
// Orders are only ever rebuilt from their events, never deserialized.
//
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    // Identity
    id: OrderId,
    version: i64,

    // Snapshot taken at placement
    customer_id: CustomerId,
    lines: Vec<OrderLine>,
    address_id: AddressId,
    delivery: DeliveryOptions,
    pricing: OrderPricing,

    // Lifecycle
    status: OrderStatus,
    tracking: Option<TrackingInfo>,

    // Audit Trail
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Validate and create a pending order in one step
    pub fn place(command: &OrderCommand) -> Result<Self, OrderError> {
        let events = Self::handle_create(command)?;
        let (first, rest) = events.split_first().ok_or(OrderError::NotInitialized)?;

        let mut order = Self::apply_first_event(first)?;
        for event in rest {
            order.apply_event(event)?;
        }
        Ok(order)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn address_id(&self) -> AddressId {
        self.address_id
    }

    pub fn delivery(&self) -> &DeliveryOptions {
        &self.delivery
    }

    pub fn pricing(&self) -> &OrderPricing {
        &self.pricing
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn tracking(&self) -> Option<&TrackingInfo> {
        self.tracking.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderError> {
        if lines.is_empty() {
            return Err(OrderError::EmptyLines);
        }

        for line in lines {
            if line.quantity < 1 {
                return Err(OrderError::InvalidQuantity(line.quantity));
            }
        }

        Ok(())
    }

    fn reject_terminal(&self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Cancelled => Err(OrderError::AlreadyCancelled),
            OrderStatus::Delivered => Err(OrderError::AlreadyDelivered),
            _ => Ok(()),
        }
    }

    fn expect_status(&self, required: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        self.reject_terminal()?;
        if self.status != required {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Order {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn handle_create(command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder {
                order_id,
                customer_id,
                lines,
                address_id,
                delivery,
                pricing,
            } => {
                Self::validate_lines(lines)?;

                Ok(vec![OrderEvent::Placed(OrderPlaced {
                    order_id: *order_id,
                    customer_id: *customer_id,
                    lines: lines.clone(),
                    address_id: *address_id,
                    delivery: delivery.clone(),
                    pricing: *pricing,
                    placed_at: Utc::now(),
                })])
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => {
                Self::validate_lines(&e.lines)?;
                Ok(Self {
                    id: e.order_id,
                    version: 1,
                    customer_id: e.customer_id,
                    lines: e.lines.clone(),
                    address_id: e.address_id,
                    delivery: e.delivery.clone(),
                    pricing: e.pricing,
                    status: OrderStatus::Pending,
                    tracking: None,
                    created_at: e.placed_at,
                    updated_at: e.placed_at,
                })
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(_) => return Err(OrderError::AlreadyPlaced),
            OrderEvent::Shipped(e) => {
                self.tracking = Some(e.tracking.clone());
            }
            OrderEvent::Processing(_) | OrderEvent::Delivered(_) | OrderEvent::Cancelled(_) => {}
        }

        self.status = event.resulting_status();
        self.updated_at = event.occurred_at();
        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let now = Utc::now();

        match command {
            OrderCommand::PlaceOrder { .. } => Err(OrderError::AlreadyPlaced),

            OrderCommand::StartProcessing => {
                self.expect_status(OrderStatus::Pending, OrderStatus::Processing)?;

                Ok(vec![OrderEvent::Processing(OrderProcessing { started_at: now })])
            }

            OrderCommand::ShipOrder { tracking } => {
                self.expect_status(OrderStatus::Processing, OrderStatus::Shipped)?;

                let tracking = tracking
                    .as_ref()
                    .ok_or(OrderError::IncompleteTracking("tracking"))?;
                tracking.validate()?;

                Ok(vec![OrderEvent::Shipped(OrderShipped {
                    tracking: tracking.clone(),
                    shipped_at: now,
                })])
            }

            OrderCommand::DeliverOrder => {
                self.expect_status(OrderStatus::Shipped, OrderStatus::Delivered)?;

                Ok(vec![OrderEvent::Delivered(OrderDelivered { delivered_at: now })])
            }

            OrderCommand::CancelOrder => {
                // Can cancel from Pending, Processing or Shipped
                self.reject_terminal()?;

                Ok(vec![OrderEvent::Cancelled(OrderCancelled {
                    cancelled_from: self.status,
                    cancelled_at: now,
                })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Money;
    use crate::domain::ids::ProductId;
    use crate::error::StorageError;
    use crate::event_sourcing::core::EventEnvelope;
    use chrono::NaiveDate;

    fn test_lines() -> Vec<OrderLine> {
        vec![OrderLine {
            product_id: ProductId::new(),
            name: "Premium Sattu Powder".to_string(),
            unit_price: Money::from_rupees(299),
            quantity: 2,
            line_total: Money::from_rupees(598),
        }]
    }

    fn test_pricing() -> OrderPricing {
        OrderPricing {
            subtotal: Money::from_rupees(598),
            delivery_surcharge: Money::ZERO,
            gift_surcharge: Money::ZERO,
            tax: Money::from_rupees(30),
            total: Money::from_rupees(628),
        }
    }

    fn place_command(lines: Vec<OrderLine>) -> OrderCommand {
        OrderCommand::PlaceOrder {
            order_id: OrderId::generate(),
            customer_id: CustomerId::new(),
            lines,
            address_id: AddressId::new(),
            delivery: DeliveryOptions::new(),
            pricing: test_pricing(),
        }
    }

    fn tracking() -> TrackingInfo {
        TrackingInfo::new("Blue Dart", "BD123456", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
    }

    fn execute(order: &mut Order, command: OrderCommand) -> Result<(), OrderError> {
        let events = order.handle_command(&command)?;
        for event in &events {
            order.apply_event(event)?;
        }
        Ok(())
    }

    #[test]
    fn test_place_creates_pending_order() {
        let order = Order::place(&place_command(test_lines())).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.version(), 1);
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.pricing().total, Money::from_rupees(628));
        assert!(order.tracking().is_none());
    }

    #[test]
    fn test_place_with_empty_lines_fails() {
        let result = Order::place(&place_command(vec![]));
        assert_eq!(result.unwrap_err(), OrderError::EmptyLines);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut order = Order::place(&place_command(test_lines())).unwrap();

        execute(&mut order, OrderCommand::StartProcessing).unwrap();
        assert_eq!(order.status(), OrderStatus::Processing);

        execute(&mut order, OrderCommand::ShipOrder { tracking: Some(tracking()) }).unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);
        assert_eq!(order.tracking().unwrap().tracking_number, "BD123456");

        execute(&mut order, OrderCommand::DeliverOrder).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.version(), 4);
    }

    #[test]
    fn test_ship_without_tracking_leaves_status_unchanged() {
        let mut order = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut order, OrderCommand::StartProcessing).unwrap();

        let result = execute(&mut order, OrderCommand::ShipOrder { tracking: None });
        assert_eq!(result.unwrap_err(), OrderError::IncompleteTracking("tracking"));
        assert_eq!(order.status(), OrderStatus::Processing);
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn test_ship_with_incomplete_tracking_fails() {
        let mut order = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut order, OrderCommand::StartProcessing).unwrap();

        let mut partial = tracking();
        partial.agency = String::new();
        let result = execute(&mut order, OrderCommand::ShipOrder { tracking: Some(partial) });
        assert_eq!(result.unwrap_err(), OrderError::IncompleteTracking("agency"));
        assert_eq!(order.status(), OrderStatus::Processing);
    }

    #[test]
    fn test_cannot_skip_states() {
        let order = Order::place(&place_command(test_lines())).unwrap();

        let result = order.handle_command(&OrderCommand::ShipOrder { tracking: Some(tracking()) });
        assert_eq!(
            result.unwrap_err(),
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            }
        );

        let result = order.handle_command(&OrderCommand::DeliverOrder);
        assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));
    }

    #[test]
    fn test_cancel_from_each_non_terminal_state() {
        let mut pending = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut pending, OrderCommand::CancelOrder).unwrap();
        assert_eq!(pending.status(), OrderStatus::Cancelled);

        let mut processing = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut processing, OrderCommand::StartProcessing).unwrap();
        execute(&mut processing, OrderCommand::CancelOrder).unwrap();
        assert_eq!(processing.status(), OrderStatus::Cancelled);

        let mut shipped = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut shipped, OrderCommand::StartProcessing).unwrap();
        execute(&mut shipped, OrderCommand::ShipOrder { tracking: Some(tracking()) }).unwrap();
        execute(&mut shipped, OrderCommand::CancelOrder).unwrap();
        assert_eq!(shipped.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_terminal_states_reject_commands() {
        let mut order = Order::place(&place_command(test_lines())).unwrap();
        execute(&mut order, OrderCommand::CancelOrder).unwrap();

        assert_eq!(
            order.handle_command(&OrderCommand::CancelOrder).unwrap_err(),
            OrderError::AlreadyCancelled
        );
        assert_eq!(
            order.handle_command(&OrderCommand::StartProcessing).unwrap_err(),
            OrderError::AlreadyCancelled
        );
    }

    #[test]
    fn test_place_on_existing_order_fails() {
        let order = Order::place(&place_command(test_lines())).unwrap();
        let result = order.handle_command(&place_command(test_lines()));
        assert_eq!(result.unwrap_err(), OrderError::AlreadyPlaced);
    }

    #[test]
    fn test_apply_first_event_non_placed_fails() {
        let event = OrderEvent::Delivered(OrderDelivered { delivered_at: Utc::now() });
        let result = Order::apply_first_event(&event);
        assert_eq!(result.unwrap_err(), OrderError::NotInitialized);
    }

    #[test]
    fn test_snapshot_unchanged_by_transitions() {
        let mut order = Order::place(&place_command(test_lines())).unwrap();
        let lines = order.lines().to_vec();
        let pricing = *order.pricing();
        let address_id = order.address_id();

        execute(&mut order, OrderCommand::StartProcessing).unwrap();
        execute(&mut order, OrderCommand::ShipOrder { tracking: Some(tracking()) }).unwrap();

        assert_eq!(order.lines(), lines.as_slice());
        assert_eq!(*order.pricing(), pricing);
        assert_eq!(order.address_id(), address_id);
    }

    #[test]
    fn test_load_from_events_full_lifecycle() {
        let order = Order::place(&place_command(test_lines())).unwrap();
        let aggregate_id = order.aggregate_id();
        let correlation_id = Uuid::new_v4();

        let events = vec![
            EventEnvelope::new(aggregate_id, 1, OrderEvent::Placed(OrderPlaced::from(&order)), correlation_id),
            EventEnvelope::new(
                aggregate_id,
                2,
                OrderEvent::Processing(OrderProcessing { started_at: Utc::now() }),
                correlation_id,
            ),
            EventEnvelope::new(
                aggregate_id,
                3,
                OrderEvent::Shipped(OrderShipped { tracking: tracking(), shipped_at: Utc::now() }),
                correlation_id,
            ),
        ];

        let loaded = Order::load_from_events(aggregate_id, events).unwrap();
        assert_eq!(loaded.id(), order.id());
        assert_eq!(loaded.version(), 3);
        assert_eq!(loaded.status(), OrderStatus::Shipped);
        assert_eq!(loaded.tracking(), Some(&tracking()));
    }

    #[test]
    fn test_load_rejects_placed_event_without_lines() {
        let order = Order::place(&place_command(test_lines())).unwrap();
        let aggregate_id = order.aggregate_id();

        let mut placed = OrderPlaced::from(&order);
        placed.lines.clear();
        let events = vec![EventEnvelope::new(aggregate_id, 1, OrderEvent::Placed(placed), Uuid::new_v4())];

        let result = Order::load_from_events(aggregate_id, events);
        assert!(matches!(result, Err(StorageError::CorruptStream { .. })));
    }
}
