use serde::{Deserialize, Serialize};

use crate::domain::catalog::{CatalogItem, Money};
use crate::domain::ids::LineId;

// ============================================================================
// Cart Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.item.unit_price.times(self.quantity)
    }
}
