use std::sync::Arc;

use crate::backend::StorefrontBackend;
use crate::domain::address::AddressBook;
use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, CustomBlend};
use crate::domain::delivery::DeliveryOptions;
use crate::domain::ids::{CustomerId, LineId, ProductId};
use crate::domain::order::Order;
use crate::domain::pricing::{OrderPricing, PricingPolicy};
use crate::domain::wishlist::Wishlist;
use crate::error::{CheckoutError, CheckoutResult, StorageError, ValidationError};
use crate::metrics::CheckoutMetrics;

use super::draft::{compute_order, OrderDraft, OrderReview};

// ============================================================================
// Checkout Session - Everything one customer touches while checking out
// ============================================================================
//
// All mutation is synchronous. Only loading and `place_order` reach the
// backend, and `place_order` changes session state only after the backend
// accepted the order.
//
// ============================================================================

pub struct CheckoutSession {
    customer_id: CustomerId,
    catalog: Catalog,
    cart: Cart,
    addresses: AddressBook,
    wishlist: Wishlist,
    delivery: DeliveryOptions,
    policy: PricingPolicy,
    metrics: Option<Arc<CheckoutMetrics>>,
}

impl CheckoutSession {
    pub fn new(customer_id: CustomerId, catalog: Catalog, policy: PricingPolicy) -> Self {
        Self {
            customer_id,
            catalog,
            cart: Cart::new(),
            addresses: AddressBook::new(customer_id),
            wishlist: Wishlist::new(customer_id),
            delivery: DeliveryOptions::default(),
            policy,
            metrics: None,
        }
    }

    /// Start a session from the backend's catalog and the customer's saved addresses
    pub async fn load<B>(customer_id: CustomerId, backend: &B, policy: PricingPolicy) -> Result<Self, StorageError>
    where
        B: StorefrontBackend + ?Sized,
    {
        let catalog = Catalog::new(backend.load_catalog().await?);
        let addresses = backend.load_addresses(customer_id).await?;

        tracing::debug!(
            customer_id = %customer_id,
            catalog_items = catalog.len(),
            addresses = addresses.len(),
            "Checkout session loaded"
        );

        let mut session = Self::new(customer_id, catalog, policy);
        session.addresses = AddressBook::from_addresses(customer_id, addresses);
        Ok(session)
    }

    pub fn with_metrics(mut self, metrics: Arc<CheckoutMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    pub fn addresses_mut(&mut self) -> &mut AddressBook {
        &mut self.addresses
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    pub fn delivery(&self) -> &DeliveryOptions {
        &self.delivery
    }

    pub fn delivery_mut(&mut self) -> &mut DeliveryOptions {
        &mut self.delivery
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Add a catalog product to the cart by id
    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) -> Result<LineId, ValidationError> {
        let item = self
            .catalog
            .get(product_id)
            .ok_or(ValidationError::UnknownProduct(product_id))?;
        self.cart.add_item(item, quantity)
    }

    /// Price a custom blend and add it to the cart as its own line
    pub fn add_custom_blend(&mut self, blend: &CustomBlend, quantity: u32) -> Result<LineId, ValidationError> {
        let item = blend.build()?;
        self.cart.add_item(&item, quantity)
    }

    pub fn move_to_cart(&mut self, product_id: ProductId) -> Result<LineId, ValidationError> {
        self.wishlist.move_to_cart(product_id, &self.catalog, &mut self.cart)
    }

    pub fn compute_order(&self) -> CheckoutResult<OrderPricing> {
        compute_order(&self.cart, &self.addresses, &self.delivery, &self.policy)
    }

    /// Priced snapshot of the current selections, for the review step
    pub fn draft(&self) -> CheckoutResult<OrderReview> {
        OrderDraft::from_cart(self.customer_id, &self.cart)?
            .ship_to(&self.addresses)?
            .with_delivery(&self.delivery)
            .review(&self.policy)
    }

    /// Confirm the draft and hand it to the backend. On success the cart is
    /// cleared and delivery options reset. On failure nothing changes and the
    /// error is returned as is; there is no retry.
    pub async fn place_order<B>(&mut self, backend: &B) -> CheckoutResult<Order>
    where
        B: StorefrontBackend + ?Sized,
    {
        let result = self.confirm_and_persist(backend).await;

        match &result {
            Ok(order) => {
                self.cart.clear();
                self.delivery = DeliveryOptions::default();

                if let Some(metrics) = &self.metrics {
                    metrics.record_order_placed(order.pricing().total);
                }
                tracing::info!(
                    order_id = %order.id(),
                    customer_id = %self.customer_id,
                    total = %order.pricing().total,
                    "✅ Order placed"
                );
            }
            Err(e) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_checkout_failure(e.reason());
                }
                tracing::warn!(customer_id = %self.customer_id, reason = e.reason(), error = %e, "Checkout failed");
            }
        }

        result
    }

    async fn confirm_and_persist<B>(&self, backend: &B) -> CheckoutResult<Order>
    where
        B: StorefrontBackend + ?Sized,
    {
        let order = self.draft()?.confirm()?;
        backend.persist_order(&order).await.map_err(CheckoutError::Storage)?;
        Ok(order)
    }

    /// Write the address book back to the backend
    pub async fn save_addresses<B>(&self, backend: &B) -> Result<(), StorageError>
    where
        B: StorefrontBackend + ?Sized,
    {
        let addresses = self.addresses.addresses().into_iter().cloned().collect();
        backend.save_addresses(self.customer_id, addresses).await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
