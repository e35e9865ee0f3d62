use serde::{Deserialize, Serialize};

use crate::domain::catalog::{CatalogItem, Money};
use crate::domain::ids::{LineId, ProductId};
use crate::error::ValidationError;

use super::value_objects::CartLine;

// ============================================================================
// Cart Aggregate - In-memory basket for a single checkout session
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item`, merging into an existing line for the
    /// same product. Returns the id of the line that now holds the item.
    pub fn add_item(&mut self, item: &CatalogItem, quantity: u32) -> Result<LineId, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }
        if !item.in_stock {
            return Err(ValidationError::OutOfStock(item.id));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            tracing::debug!(line_id = %line.id, quantity = line.quantity, "Merged item into cart line");
            return Ok(line.id);
        }

        let line = CartLine {
            id: LineId::new(),
            item: item.clone(),
            quantity,
        };
        let id = line.id;
        tracing::debug!(line_id = %id, product_id = %item.id, quantity, "Added cart line");
        self.lines.push(line);
        Ok(id)
    }

    /// Adjust a line by `delta`. The quantity never drops below 1; use
    /// `remove_item` to delete a line.
    pub fn update_quantity(&mut self, line_id: LineId, delta: i64) -> Result<u32, ValidationError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or(ValidationError::UnknownCartLine(line_id))?;

        let next = (i64::from(line.quantity) + delta).clamp(1, i64::from(u32::MAX));
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Ok(line.quantity)
    }

    /// Idempotent: removing an absent line is not an error
    pub fn remove_item(&mut self, line_id: LineId) {
        self.lines.retain(|line| line.id != line_id);
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == product_id)
    }

    /// Total number of units across all lines (header badge count)
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
