// ============================================================================
// Storefront Backend - Collaborator boundary
// ============================================================================
//
// Catalog, addresses and orders live behind this port. The checkout core is
// synchronous and pure; only calls through this trait are async and can fail
// with a StorageError, which callers surface unchanged.
//
// ============================================================================

use async_trait::async_trait;

use crate::domain::address::Address;
use crate::domain::catalog::CatalogItem;
use crate::domain::ids::{CustomerId, OrderId};
use crate::domain::order::{Order, OrderStatus, TrackingInfo};
use crate::error::StorageError;

pub mod in_memory;

pub use in_memory::InMemoryBackend;

/// Criteria for `list_orders`. Empty filter matches every order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer: Option<CustomerId>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn for_customer(customer: CustomerId) -> Self {
        Self {
            customer: Some(customer),
            status: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.customer.is_none_or(|c| order.customer_id() == c)
            && self.status.is_none_or(|s| order.status() == s)
    }
}

#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>, StorageError>;

    async fn load_addresses(&self, owner: CustomerId) -> Result<Vec<Address>, StorageError>;

    async fn save_addresses(&self, owner: CustomerId, addresses: Vec<Address>) -> Result<(), StorageError>;

    /// Store a freshly confirmed (pending) order
    async fn persist_order(&self, order: &Order) -> Result<OrderId, StorageError>;

    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        tracking: Option<TrackingInfo>,
    ) -> Result<(), StorageError>;

    async fn load_order(&self, order_id: OrderId) -> Result<Option<Order>, StorageError>;

    /// Orders matching `filter`, newest first
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, StorageError>;
}
