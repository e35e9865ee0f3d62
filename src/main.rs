use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, Utc};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storefront_checkout::domain::address::AddressFields;
use storefront_checkout::domain::catalog::{BlendIngredient, CatalogItem, CustomBlend, Money, WeightTier};
use storefront_checkout::domain::delivery::DeliverySpeed;
use storefront_checkout::domain::ids::{CustomerId, ProductId};
use storefront_checkout::domain::order::{OrderStatus, SalesSummary, TrackingInfo};
use storefront_checkout::metrics::CheckoutMetrics;
use storefront_checkout::{
    CheckoutConfig, CheckoutSession, InMemoryBackend, OrderCommandHandler, OrderFilter, StorefrontBackend,
};

fn seed_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("Premium Roasted Sattu Powder (1kg)", Money::from_rupees(299), "Powder", true),
        CatalogItem::new("Ready to Mix Sattu Drink", Money::from_rupees(449), "Drinks", true),
        CatalogItem::new("Sattu Energy Ladoo (Pack of 12)", Money::from_rupees(350), "Snacks", true),
        CatalogItem::new("Organic Sattu Powder (500g)", Money::from_rupees(199), "Powder", true),
    ]
}

fn product_id(session: &CheckoutSession, name: &str) -> anyhow::Result<ProductId> {
    session
        .catalog()
        .find_by_name(name)
        .map(|item| item.id)
        .with_context(|| format!("catalog has no product named {name:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CheckoutConfig::from_env()?;

    // Default filter comes from config, RUST_LOG still wins
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("🚀 Starting storefront checkout demo");
    tracing::debug!(pricing = ?config.pricing, "Pricing policy loaded");

    let metrics = Arc::new(CheckoutMetrics::new()?);
    let backend = Arc::new(InMemoryBackend::new(seed_catalog()));

    // === 1. Customer session ===
    let customer_id = CustomerId::new();
    let mut session = CheckoutSession::load(customer_id, backend.as_ref(), config.pricing.clone())
        .await?
        .with_metrics(metrics.clone());

    let categories = session.catalog().categories().join(", ");
    tracing::info!(items = session.catalog().len(), %categories, "🛒 Catalog loaded");

    let powder = product_id(&session, "Premium Roasted Sattu Powder (1kg)")?;
    let organic = product_id(&session, "Organic Sattu Powder (500g)")?;
    let ladoo = product_id(&session, "Sattu Energy Ladoo (Pack of 12)")?;

    session.add_to_cart(powder, 2)?;
    session.add_to_cart(organic, 1)?;
    session.wishlist_mut().add(ladoo);

    session.addresses_mut().add_address(AddressFields {
        name: "Ravi Kumar".to_string(),
        phone: "9123456780".to_string(),
        street: "Boring Road".to_string(),
        city: "Patna".to_string(),
        state: "Bihar".to_string(),
        postal_code: "800013".to_string(),
    })?;
    session.save_addresses(backend.as_ref()).await?;

    // === 2. Review and place ===
    let review = session.draft()?;
    tracing::info!(
        subtotal = %review.pricing().subtotal,
        tax = %review.pricing().tax,
        total = %review.pricing().total,
        ship_to = %review.address().one_line(),
        "🧾 Order review"
    );

    let first = session.place_order(backend.as_ref()).await?;

    // Second order: wishlist item plus a custom blend, express gift delivery
    session.move_to_cart(ladoo)?;
    let mut blend = CustomBlend::new(WeightTier::Grams500).with_custom_weight(750)?;
    for ingredient in [BlendIngredient::RoastedChickpeas, BlendIngredient::Cardamom, BlendIngredient::Jaggery] {
        blend.toggle(ingredient);
    }
    tracing::info!(blend = %blend, price = %blend.price(1), "🥣 Custom blend priced");
    session.add_custom_blend(&blend, 1)?;
    session.delivery_mut().set_speed(DeliverySpeed::Express);
    session.delivery_mut().set_gift(true, Some("Happy Chhath!"))?;
    let second = session.place_order(backend.as_ref()).await?;

    // === 3. Admin workflow ===
    let admin = OrderCommandHandler::new(backend.clone()).with_metrics(metrics.clone());

    admin.transition(first.id(), OrderStatus::Processing, None).await?;
    let eta = Utc::now().date_naive().checked_add_days(Days::new(4)).unwrap_or_else(|| Utc::now().date_naive());
    admin
        .transition(first.id(), OrderStatus::Shipped, Some(TrackingInfo::new("Blue Dart", "BD20250117", eta)))
        .await?;
    admin.transition(first.id(), OrderStatus::Delivered, None).await?;

    if let Err(e) = admin.transition(second.id(), OrderStatus::Shipped, None).await {
        tracing::warn!(order_id = %second.id(), error = %e, "Transition refused");
    }
    admin.cancel(second.id()).await?;

    // === 4. Reporting ===
    let orders = backend.list_orders(OrderFilter::for_customer(customer_id)).await?;
    for order in &orders {
        tracing::info!(order_id = %order.id(), status = %order.status(), total = %order.pricing().total, "📦 Order");
    }

    let summary = SalesSummary::from_orders(&orders);
    tracing::info!("📊 Sales summary: {}", serde_json::to_string(&summary)?);
    tracing::debug!("Metrics:\n{}", metrics.encode_text()?);

    Ok(())
}
