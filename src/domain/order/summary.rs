use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::catalog::Money;

use super::aggregate::Order;
use super::value_objects::OrderStatus;

/// Dashboard figures for a set of orders. Cancelled orders count toward
/// `order_count` and `by_status` but never toward revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub order_count: usize,
    pub revenue: Money,
    pub by_status: BTreeMap<String, usize>,
    pub average_order_value: Money,
}

impl SalesSummary {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut by_status: BTreeMap<String, usize> = OrderStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), 0))
            .collect();

        let mut order_count = 0;
        let mut revenue = Money::ZERO;
        let mut billable = 0u32;

        for order in orders {
            order_count += 1;
            *by_status.entry(order.status().as_str().to_string()).or_default() += 1;

            if order.status() != OrderStatus::Cancelled {
                revenue += order.pricing().total;
                billable += 1;
            }
        }

        let average_order_value = if billable == 0 {
            Money::ZERO
        } else {
            let average = revenue.amount() / Decimal::from(billable);
            Money::new(average.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        };

        Self {
            order_count,
            revenue,
            by_status,
            average_order_value,
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or_default()
    }
}
