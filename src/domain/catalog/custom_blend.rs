use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::value_objects::{CatalogItem, Money};

// ============================================================================
// Custom Blend Builder
// ============================================================================
//
// price = round(tier_price / tier_grams * grams * (1 + 0.1 * ingredients) * qty)
//
// A custom weight reuses the per-gram rate of the selected tier. A blend
// needs at least one ingredient before it can go in the cart.
//
// ============================================================================

pub const CUSTOM_BLEND_CATEGORY: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendIngredient {
    RoastedChickpeas,
    Barley,
    Wheat,
    BlackGram,
    GreenGram,
    Peanuts,
    Almonds,
    Cashews,
    SesameSeeds,
    FlaxSeeds,
    Cardamom,
    Cinnamon,
    DryGinger,
    FennelSeeds,
    CuminSeeds,
    Jaggery,
    RockSalt,
}

impl BlendIngredient {
    pub const ALL: [BlendIngredient; 17] = [
        Self::RoastedChickpeas,
        Self::Barley,
        Self::Wheat,
        Self::BlackGram,
        Self::GreenGram,
        Self::Peanuts,
        Self::Almonds,
        Self::Cashews,
        Self::SesameSeeds,
        Self::FlaxSeeds,
        Self::Cardamom,
        Self::Cinnamon,
        Self::DryGinger,
        Self::FennelSeeds,
        Self::CuminSeeds,
        Self::Jaggery,
        Self::RockSalt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RoastedChickpeas => "Roasted Chickpeas (Chana)",
            Self::Barley => "Barley (Jau)",
            Self::Wheat => "Wheat (Gehun)",
            Self::BlackGram => "Black Gram (Urad Dal)",
            Self::GreenGram => "Green Gram (Moong Dal)",
            Self::Peanuts => "Peanuts (Moongfali)",
            Self::Almonds => "Almonds (Badam)",
            Self::Cashews => "Cashews (Kaju)",
            Self::SesameSeeds => "Sesame Seeds (Til)",
            Self::FlaxSeeds => "Flax Seeds (Alsi)",
            Self::Cardamom => "Cardamom (Elaichi)",
            Self::Cinnamon => "Cinnamon (Dalchini)",
            Self::DryGinger => "Dry Ginger (Sonth)",
            Self::FennelSeeds => "Fennel Seeds (Saunf)",
            Self::CuminSeeds => "Cumin Seeds (Jeera)",
            Self::Jaggery => "Jaggery (Gur)",
            Self::RockSalt => "Rock Salt (Sendha Namak)",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::RoastedChickpeas | Self::Barley | Self::Wheat => "Base Grains",
            Self::BlackGram | Self::GreenGram => "Pulses",
            Self::Peanuts | Self::Almonds | Self::Cashews | Self::SesameSeeds | Self::FlaxSeeds => "Nuts & Seeds",
            Self::Cardamom | Self::Cinnamon | Self::DryGinger | Self::FennelSeeds | Self::CuminSeeds => "Spices",
            Self::Jaggery => "Sweeteners",
            Self::RockSalt => "Seasonings",
        }
    }
}

/// Pack sizes with a fixed price; the price sets the per-gram rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTier {
    #[default]
    Grams500,
    Kg1,
    Kg2,
    Kg5,
}

impl WeightTier {
    pub const ALL: [WeightTier; 4] = [Self::Grams500, Self::Kg1, Self::Kg2, Self::Kg5];

    pub fn grams(&self) -> u32 {
        match self {
            Self::Grams500 => 500,
            Self::Kg1 => 1000,
            Self::Kg2 => 2000,
            Self::Kg5 => 5000,
        }
    }

    pub fn price(&self) -> Money {
        match self {
            Self::Grams500 => Money::from_rupees(150),
            Self::Kg1 => Money::from_rupees(280),
            Self::Kg2 => Money::from_rupees(540),
            Self::Kg5 => Money::from_rupees(1300),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grams500 => "500g",
            Self::Kg1 => "1kg",
            Self::Kg2 => "2kg",
            Self::Kg5 => "5kg",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomBlend {
    tier: WeightTier,
    custom_grams: Option<u32>,
    ingredients: BTreeSet<BlendIngredient>,
}

impl CustomBlend {
    pub fn new(tier: WeightTier) -> Self {
        Self {
            tier,
            ..Self::default()
        }
    }

    /// Order an arbitrary weight at the selected tier's per-gram rate
    pub fn with_custom_weight(mut self, grams: u32) -> Result<Self, ValidationError> {
        if grams == 0 {
            return Err(ValidationError::InvalidWeight(grams));
        }
        self.custom_grams = Some(grams);
        Ok(self)
    }

    pub fn set_tier(&mut self, tier: WeightTier) {
        self.tier = tier;
    }

    /// Add or remove an ingredient. Returns whether it is now selected.
    pub fn toggle(&mut self, ingredient: BlendIngredient) -> bool {
        if self.ingredients.remove(&ingredient) {
            false
        } else {
            self.ingredients.insert(ingredient);
            true
        }
    }

    pub fn ingredients(&self) -> impl Iterator<Item = BlendIngredient> + '_ {
        self.ingredients.iter().copied()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn weight_grams(&self) -> u32 {
        self.custom_grams.unwrap_or_else(|| self.tier.grams())
    }

    pub fn weight_label(&self) -> String {
        match self.custom_grams {
            Some(grams) => format!("{grams}g"),
            None => self.tier.label().to_string(),
        }
    }

    /// Total for `quantity` blends, rounded to whole rupees
    pub fn price(&self, quantity: u32) -> Money {
        let weight_ratio = Decimal::from(self.weight_grams()) / Decimal::from(self.tier.grams());
        let multiplier = Decimal::ONE + Decimal::new(1, 1) * Decimal::from(self.ingredients.len() as u64);

        self.tier
            .price()
            .apply_rate(weight_ratio * multiplier * Decimal::from(quantity))
    }

    /// Turn the blend into a cart-ready item priced for one unit
    pub fn build(&self) -> Result<CatalogItem, ValidationError> {
        if self.ingredients.is_empty() {
            return Err(ValidationError::EmptyBlend);
        }

        Ok(CatalogItem::new(
            self.to_string(),
            self.price(1),
            CUSTOM_BLEND_CATEGORY,
            true,
        ))
    }
}

impl fmt::Display for CustomBlend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Custom Sattu ({}) with {} ingredients",
            self.weight_label(),
            self.ingredients.len()
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
