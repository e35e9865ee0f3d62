use std::env;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;

use crate::domain::catalog::Money;
use crate::domain::pricing::PricingPolicy;

pub const DEFAULT_LOG_FILTER: &str = "info,storefront_checkout=debug";

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub pricing: PricingPolicy,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl CheckoutConfig {
    /// Read `.env` (if present) and the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PricingPolicy::default();

        let tax_rate = parse_or(&lookup, "CHECKOUT_TAX_RATE", defaults.tax_rate)?;
        if tax_rate.is_sign_negative() || tax_rate >= Decimal::ONE {
            anyhow::bail!("CHECKOUT_TAX_RATE must be in [0, 1), got {tax_rate}");
        }

        let pricing = PricingPolicy {
            tax_rate,
            express_surcharge: surcharge(&lookup, "CHECKOUT_EXPRESS_SURCHARGE", defaults.express_surcharge)?,
            overnight_surcharge: surcharge(&lookup, "CHECKOUT_OVERNIGHT_SURCHARGE", defaults.overnight_surcharge)?,
            gift_surcharge: surcharge(&lookup, "CHECKOUT_GIFT_SURCHARGE", defaults.gift_surcharge)?,
        };

        Ok(Self {
            pricing,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: Decimal) -> anyhow::Result<Decimal>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => Decimal::from_str(raw.trim()).with_context(|| format!("{key} is not a decimal: {raw:?}")),
        None => Ok(default),
    }
}

fn surcharge<F>(lookup: &F, key: &str, default: Money) -> anyhow::Result<Money>
where
    F: Fn(&str) -> Option<String>,
{
    let amount = parse_or(lookup, key, default.amount())?;
    if amount.is_sign_negative() {
        anyhow::bail!("{key} cannot be negative, got {amount}");
    }
    Ok(Money::new(amount))
}
