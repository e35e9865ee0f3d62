use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::domain::catalog::Money;
use crate::domain::delivery::{DeliveryOptions, DeliverySpeed};

// ============================================================================
// Pricing Engine
// ============================================================================
//
// total = subtotal + delivery surcharge + gift surcharge + tax
// tax   = round(subtotal * tax_rate), halves away from zero
//
// Pure and deterministic: the same lines and options always yield the same
// OrderPricing.
//
// ============================================================================

/// Surcharges and tax rate applied at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub tax_rate: Decimal,
    pub express_surcharge: Money,
    pub overnight_surcharge: Money,
    pub gift_surcharge: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(5, 2),
            express_surcharge: Money::from_rupees(50),
            overnight_surcharge: Money::from_rupees(150),
            gift_surcharge: Money::from_rupees(30),
        }
    }
}

impl PricingPolicy {
    pub fn delivery_surcharge(&self, speed: DeliverySpeed) -> Money {
        match speed {
            DeliverySpeed::Standard => Money::ZERO,
            DeliverySpeed::Express => self.express_surcharge,
            DeliverySpeed::Overnight => self.overnight_surcharge,
        }
    }

    pub fn gift_surcharge(&self, is_gift: bool) -> Money {
        if is_gift {
            self.gift_surcharge
        } else {
            Money::ZERO
        }
    }

    pub fn tax(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.tax_rate)
    }

    pub fn price(&self, lines: &[CartLine], options: &DeliveryOptions) -> OrderPricing {
        let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
        let delivery_surcharge = self.delivery_surcharge(options.speed());
        let gift_surcharge = self.gift_surcharge(options.is_gift());
        let tax = self.tax(subtotal);

        OrderPricing {
            subtotal,
            delivery_surcharge,
            gift_surcharge,
            tax,
            total: subtotal + delivery_surcharge + gift_surcharge + tax,
        }
    }
}

/// Derived price breakdown. Recomputed on every change, stored only as part
/// of an Order snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPricing {
    pub subtotal: Money,
    pub delivery_surcharge: Money,
    pub gift_surcharge: Money,
    pub tax: Money,
    pub total: Money,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogItem;
    use crate::domain::ids::LineId;

    fn line(price: i64, quantity: u32) -> CartLine {
        CartLine {
            id: LineId::new(),
            item: CatalogItem::new("Sattu", Money::from_rupees(price), "Sattu Powder", true),
            quantity,
        }
    }

    fn sample_lines() -> Vec<CartLine> {
        vec![line(299, 2), line(199, 1)]
    }

    #[test]
    fn test_standard_no_gift_pricing() {
        let pricing = PricingPolicy::default().price(&sample_lines(), &DeliveryOptions::new());

        assert_eq!(pricing.subtotal, Money::from_rupees(797));
        assert_eq!(pricing.delivery_surcharge, Money::ZERO);
        assert_eq!(pricing.gift_surcharge, Money::ZERO);
        assert_eq!(pricing.tax, Money::from_rupees(40));
        assert_eq!(pricing.total, Money::from_rupees(837));
    }

    #[test]
    fn test_express_gift_pricing() {
        let mut options = DeliveryOptions::new();
        options.set_speed(DeliverySpeed::Express);
        options.set_gift(true, Some("Enjoy!")).unwrap();

        let pricing = PricingPolicy::default().price(&sample_lines(), &options);
        assert_eq!(pricing.delivery_surcharge, Money::from_rupees(50));
        assert_eq!(pricing.gift_surcharge, Money::from_rupees(30));
        assert_eq!(pricing.total, Money::from_rupees(917));
    }

    #[test]
    fn test_delivery_surcharge_values() {
        let policy = PricingPolicy::default();
        let surcharges: Vec<Money> = DeliverySpeed::ALL
            .iter()
            .map(|speed| policy.delivery_surcharge(*speed))
            .collect();
        assert_eq!(
            surcharges,
            vec![Money::ZERO, Money::from_rupees(50), Money::from_rupees(150)]
        );
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let policy = PricingPolicy::default();
        let lines = sample_lines();
        let mut options = DeliveryOptions::new();
        options.set_speed(DeliverySpeed::Overnight);

        let first = policy.price(&lines, &options);
        for _ in 0..10 {
            assert_eq!(policy.price(&lines, &options), first);
        }
    }

    #[test]
    fn test_total_identity_holds() {
        let policy = PricingPolicy::default();
        let lines = vec![line(449, 3), line(350, 2), line(199, 7)];
        let mut options = DeliveryOptions::new();
        options.set_speed(DeliverySpeed::Express);
        options.set_gift(true, None).unwrap();

        let p = policy.price(&lines, &options);
        assert_eq!(p.total, p.subtotal + p.delivery_surcharge + p.gift_surcharge + p.tax);
        assert_eq!(p.tax, p.subtotal.apply_rate(Decimal::new(5, 2)));
    }

    #[test]
    fn test_custom_tax_rate() {
        let policy = PricingPolicy {
            tax_rate: Decimal::new(18, 2),
            ..PricingPolicy::default()
        };
        assert_eq!(policy.tax(Money::from_rupees(100)), Money::from_rupees(18));
    }
}
