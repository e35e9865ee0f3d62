use std::sync::Arc;

use crate::backend::StorefrontBackend;
use crate::error::{CheckoutResult, StorageError};
use crate::event_sourcing::core::Aggregate;
use crate::domain::ids::OrderId;
use crate::metrics::CheckoutMetrics;

use super::aggregate::Order;
use super::commands::OrderCommand;
use super::value_objects::{OrderStatus, TrackingInfo};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Load Order → Validate Command → Backend Status Update
//
// Nothing is sent to the backend when the aggregate rejects the command.
//
// ============================================================================

pub struct OrderCommandHandler<B: StorefrontBackend + ?Sized> {
    backend: Arc<B>,
    metrics: Option<Arc<CheckoutMetrics>>,
}

impl<B: StorefrontBackend + ?Sized> OrderCommandHandler<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<CheckoutMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Move an order to `to`. Tracking is only read when entering shipped.
    pub async fn transition(
        &self,
        order_id: OrderId,
        to: OrderStatus,
        tracking: Option<TrackingInfo>,
    ) -> CheckoutResult<Order> {
        let order = self.load(order_id).await?;
        let from = order.status();

        let command = OrderCommand::for_status(from, to, tracking.clone())?;
        let events = match order.handle_command(&command) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(
                    order_id = %order_id,
                    from = %from,
                    to = %to,
                    error = %e,
                    "Order transition rejected"
                );
                return Err(e.into());
            }
        };

        self.backend.update_order_status(order_id, to, tracking).await?;

        if let Some(metrics) = &self.metrics {
            metrics.record_status_transition(from, to);
        }
        tracing::info!(order_id = %order_id, from = %from, to = %to, "🚚 Order status updated");

        // The update is committed; a failed reload must not report it as failed
        match self.load(order_id).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                tracing::warn!(
                    order_id = %order_id,
                    to = %to,
                    error = %e,
                    "Status update committed but reload failed, returning local state"
                );
                let mut updated = order;
                for event in &events {
                    updated.apply_event(event)?;
                }
                Ok(updated)
            }
        }
    }

    pub async fn cancel(&self, order_id: OrderId) -> CheckoutResult<Order> {
        self.transition(order_id, OrderStatus::Cancelled, None).await
    }

    async fn load(&self, order_id: OrderId) -> Result<Order, StorageError> {
        self.backend
            .load_order(order_id)
            .await?
            .ok_or(StorageError::OrderNotFound(order_id))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
