use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use rust_decimal::prelude::ToPrimitive;

use crate::domain::catalog::Money;
use crate::domain::order::OrderStatus;

// ============================================================================
// Metrics Module - Prometheus metrics for checkout observability
// ============================================================================
//
// - Orders placed and the distribution of their totals
// - Checkout failures by reason (validation, empty_cart, no_address, storage)
// - Order status transitions by from/to
//
// ============================================================================

/// Central metrics registry for the checkout pipeline
pub struct CheckoutMetrics {
    registry: Registry,

    // Checkout Metrics
    pub orders_placed: IntCounter,
    pub checkout_failures: IntCounterVec,
    pub order_total: Histogram,

    // Order Workflow Metrics
    pub status_transitions: IntCounterVec,
}

impl CheckoutMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed = IntCounter::new("checkout_orders_placed_total", "Total orders placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let checkout_failures = IntCounterVec::new(
            Opts::new("checkout_failures_total", "Checkout attempts that did not produce an order"),
            &["reason"],
        )?;
        registry.register(Box::new(checkout_failures.clone()))?;

        let order_total = Histogram::with_opts(
            HistogramOpts::new("checkout_order_total_rupees", "Order totals in rupees")
                .buckets(vec![100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0]),
        )?;
        registry.register(Box::new(order_total.clone()))?;

        let status_transitions = IntCounterVec::new(
            Opts::new("order_status_transitions_total", "Order status transitions"),
            &["from_status", "to_status"],
        )?;
        registry.register(Box::new(status_transitions.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            checkout_failures,
            order_total,
            status_transitions,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self, total: Money) {
        self.orders_placed.inc();
        self.order_total.observe(total.amount().to_f64().unwrap_or_default());
    }

    pub fn record_checkout_failure(&self, reason: &str) {
        self.checkout_failures.with_label_values(&[reason]).inc();
    }

    pub fn record_status_transition(&self, from: OrderStatus, to: OrderStatus) {
        self.status_transitions
            .with_label_values(&[from.as_str(), to.as_str()])
            .inc();
    }

    /// Render every registered metric in the Prometheus text format
    pub fn encode_text(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
