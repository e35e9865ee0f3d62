//! In-memory storefront backend for development and tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::address::Address;
use crate::domain::catalog::CatalogItem;
use crate::domain::ids::{CustomerId, OrderId};
use crate::domain::order::{Order, OrderCommand, OrderEvent, OrderPlaced, OrderStatus, TrackingInfo};
use crate::error::StorageError;
use crate::event_sourcing::{envelopes_for, Aggregate, EventStore};

use super::{OrderFilter, StorefrontBackend};

/// Orders are kept as event streams; catalog and addresses as plain maps.
/// Switching the backend offline makes every call fail with `Unavailable`.
pub struct InMemoryBackend {
    catalog: RwLock<Vec<CatalogItem>>,
    addresses: RwLock<HashMap<CustomerId, Vec<Address>>>,
    orders: EventStore<OrderEvent>,
    online: AtomicBool,
}

impl InMemoryBackend {
    pub fn new(catalog: Vec<CatalogItem>) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            addresses: RwLock::new(HashMap::new()),
            orders: EventStore::new("Order"),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::warn!(online, "Backend connectivity changed");
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Raw event history of an order
    pub async fn order_events(&self, order_id: OrderId) -> Vec<OrderEvent> {
        self.orders
            .load_events(order_id.as_uuid())
            .await
            .into_iter()
            .map(|envelope| envelope.event_data)
            .collect()
    }

    fn ensure_online(&self) -> Result<(), StorageError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StorageError::Unavailable("backend is offline".to_string()))
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl StorefrontBackend for InMemoryBackend {
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>, StorageError> {
        self.ensure_online()?;
        Ok(self.catalog.read().await.clone())
    }

    async fn load_addresses(&self, owner: CustomerId) -> Result<Vec<Address>, StorageError> {
        self.ensure_online()?;
        let addresses = self.addresses.read().await;
        Ok(addresses.get(&owner).cloned().unwrap_or_default())
    }

    async fn save_addresses(&self, owner: CustomerId, addresses: Vec<Address>) -> Result<(), StorageError> {
        self.ensure_online()?;
        tracing::debug!(customer_id = %owner, count = addresses.len(), "Saving addresses");
        self.addresses.write().await.insert(owner, addresses);
        Ok(())
    }

    async fn persist_order(&self, order: &Order) -> Result<OrderId, StorageError> {
        self.ensure_online()?;

        let order_id = order.id();
        if order.status() != OrderStatus::Pending {
            return Err(StorageError::Rejected(format!(
                "order {order_id} must be pending to be placed, found {}",
                order.status()
            )));
        }

        let aggregate_id = order_id.as_uuid();
        if self.orders.aggregate_exists(aggregate_id).await {
            return Err(StorageError::DuplicateOrder(order_id));
        }

        let placed = OrderEvent::Placed(OrderPlaced::from(order));
        let envelopes = envelopes_for(aggregate_id, 0, vec![placed], Uuid::new_v4());

        match self.orders.append_events(aggregate_id, 0, envelopes).await {
            Ok(_) => Ok(order_id),
            // Lost a race with another writer for the same id
            Err(StorageError::VersionConflict { .. }) => Err(StorageError::DuplicateOrder(order_id)),
            Err(e) => Err(e),
        }
    }

    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        tracking: Option<TrackingInfo>,
    ) -> Result<(), StorageError> {
        self.ensure_online()?;

        let aggregate_id = order_id.as_uuid();
        let order: Order = self
            .orders
            .load_aggregate(aggregate_id)
            .await?
            .ok_or(StorageError::OrderNotFound(order_id))?;

        let events = OrderCommand::for_status(order.status(), status, tracking)
            .and_then(|command| order.handle_command(&command))
            .map_err(|e| StorageError::Rejected(e.to_string()))?;

        let expected_version = order.version();
        let envelopes = envelopes_for(aggregate_id, expected_version, events, Uuid::new_v4());
        self.orders.append_events(aggregate_id, expected_version, envelopes).await?;

        Ok(())
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Option<Order>, StorageError> {
        self.ensure_online()?;
        self.orders.load_aggregate(order_id.as_uuid()).await
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, StorageError> {
        self.ensure_online()?;

        let mut orders = Vec::new();
        for aggregate_id in self.orders.aggregate_ids().await {
            if let Some(order) = self.orders.load_aggregate::<Order>(aggregate_id).await? {
                if filter.matches(&order) {
                    orders.push(order);
                }
            }
        }

        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then_with(|| b.id().cmp(&a.id())));
        Ok(orders)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Money;
    use crate::domain::delivery::DeliveryOptions;
    use crate::domain::ids::{AddressId, ProductId};
    use crate::domain::order::OrderLine;
    use crate::domain::pricing::OrderPricing;
    use chrono::NaiveDate;

    fn pending_order(customer_id: CustomerId) -> Order {
        let line = OrderLine {
            product_id: ProductId::new(),
            name: "Organic Sattu Powder 500g".to_string(),
            unit_price: Money::from_rupees(199),
            quantity: 1,
            line_total: Money::from_rupees(199),
        };
        let pricing = OrderPricing {
            subtotal: Money::from_rupees(199),
            delivery_surcharge: Money::ZERO,
            gift_surcharge: Money::ZERO,
            tax: Money::from_rupees(10),
            total: Money::from_rupees(209),
        };

        Order::place(&OrderCommand::PlaceOrder {
            order_id: OrderId::generate(),
            customer_id,
            lines: vec![line],
            address_id: AddressId::new(),
            delivery: DeliveryOptions::new(),
            pricing,
        })
        .unwrap()
    }

    fn tracking() -> TrackingInfo {
        TrackingInfo::new("Delhivery", "DL998877", NaiveDate::from_ymd_opt(2025, 3, 2).unwrap())
    }

    #[tokio::test]
    async fn test_persist_and_load_order() {
        let backend = InMemoryBackend::default();
        let order = pending_order(CustomerId::new());

        let id = backend.persist_order(&order).await.unwrap();
        assert_eq!(id, order.id());

        let loaded = backend.load_order(id).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Pending);
        assert_eq!(loaded.pricing(), order.pricing());
        assert_eq!(loaded.lines(), order.lines());
    }

    #[tokio::test]
    async fn test_duplicate_order_rejected() {
        let backend = InMemoryBackend::default();
        let order = pending_order(CustomerId::new());

        backend.persist_order(&order).await.unwrap();
        let result = backend.persist_order(&order).await;
        assert_eq!(result.unwrap_err(), StorageError::DuplicateOrder(order.id()));
    }

    #[tokio::test]
    async fn test_offline_backend_fails_every_call() {
        let backend = InMemoryBackend::default();
        backend.set_online(false);

        let order = pending_order(CustomerId::new());
        assert!(matches!(backend.persist_order(&order).await, Err(StorageError::Unavailable(_))));
        assert!(matches!(backend.load_catalog().await, Err(StorageError::Unavailable(_))));

        backend.set_online(true);
        assert!(backend.persist_order(&order).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_updates_append_events() {
        let backend = InMemoryBackend::default();
        let order = pending_order(CustomerId::new());
        let id = backend.persist_order(&order).await.unwrap();

        backend.update_order_status(id, OrderStatus::Processing, None).await.unwrap();
        backend
            .update_order_status(id, OrderStatus::Shipped, Some(tracking()))
            .await
            .unwrap();

        let loaded = backend.load_order(id).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Shipped);
        assert_eq!(loaded.version(), 3);
        assert_eq!(loaded.tracking(), Some(&tracking()));

        let events = backend.order_events(id).await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], OrderEvent::Placed(_)));
    }

    #[tokio::test]
    async fn test_invalid_status_update_rejected() {
        let backend = InMemoryBackend::default();
        let id = backend.persist_order(&pending_order(CustomerId::new())).await.unwrap();

        let result = backend.update_order_status(id, OrderStatus::Delivered, None).await;
        assert!(matches!(result, Err(StorageError::Rejected(_))));

        let loaded = backend.load_order(id).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let backend = InMemoryBackend::default();
        let id = OrderId::generate();

        let result = backend.update_order_status(id, OrderStatus::Processing, None).await;
        assert_eq!(result.unwrap_err(), StorageError::OrderNotFound(id));
    }

    #[tokio::test]
    async fn test_list_orders_filters_newest_first() {
        let backend = InMemoryBackend::default();
        let alice = CustomerId::new();
        let bob = CustomerId::new();

        let first = pending_order(alice);
        let second = pending_order(alice);
        let other = pending_order(bob);
        for order in [&first, &second, &other] {
            backend.persist_order(order).await.unwrap();
        }
        backend.update_order_status(first.id(), OrderStatus::Cancelled, None).await.unwrap();

        let all = backend.list_orders(OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = backend.list_orders(OrderFilter::for_customer(alice)).await.unwrap();
        let ids: Vec<OrderId> = mine.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![second.id(), first.id()]);

        let cancelled = backend
            .list_orders(OrderFilter::for_customer(alice).with_status(OrderStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id(), first.id());
    }

    #[tokio::test]
    async fn test_addresses_round_trip() {
        let backend = InMemoryBackend::default();
        let owner = CustomerId::new();
        assert!(backend.load_addresses(owner).await.unwrap().is_empty());

        let address = Address {
            id: AddressId::new(),
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            street: "12 MG Road".to_string(),
            city: "Patna".to_string(),
            state: "Bihar".to_string(),
            postal_code: "800001".to_string(),
            is_default: true,
        };
        backend.save_addresses(owner, vec![address.clone()]).await.unwrap();

        assert_eq!(backend.load_addresses(owner).await.unwrap(), vec![address]);
    }
}
