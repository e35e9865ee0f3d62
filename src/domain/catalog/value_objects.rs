use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::ids::ProductId;

// ============================================================================
// Catalog Value Objects
// ============================================================================

/// Exact monetary amount in rupees.
///
/// Backed by `Decimal` so that sums and tax never pick up binary float error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Line total for `quantity` units at this price
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Apply a rate and round to whole rupees, halves away from zero
    pub fn apply_rate(self, rate: Decimal) -> Self {
        Self((self.0 * rate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}

/// A sellable catalog entry. Reference data, never mutated by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub category: String,
    pub in_stock: bool,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
        in_stock: bool,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            unit_price,
            category: category.into(),
            in_stock,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
