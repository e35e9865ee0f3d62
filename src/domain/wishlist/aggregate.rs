use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::domain::catalog::Catalog;
use crate::domain::ids::{CustomerId, LineId, ProductId};
use crate::error::ValidationError;

/// Saved products for one customer, in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    owner: CustomerId,
    items: Vec<ProductId>,
}

impl Wishlist {
    pub fn new(owner: CustomerId) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    /// Returns false when the product was already saved
    pub fn add(&mut self, product_id: ProductId) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.items.push(product_id);
        true
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|id| *id != product_id);
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Put one unit of a saved product in the cart. The product leaves the
    /// wishlist only if the cart accepted it.
    pub fn move_to_cart(
        &mut self,
        product_id: ProductId,
        catalog: &Catalog,
        cart: &mut Cart,
    ) -> Result<LineId, ValidationError> {
        if !self.contains(product_id) {
            return Err(ValidationError::UnknownProduct(product_id));
        }
        let item = catalog
            .get(product_id)
            .ok_or(ValidationError::UnknownProduct(product_id))?;

        let line_id = cart.add_item(item, 1)?;
        self.remove(product_id);

        tracing::debug!(product_id = %product_id, line_id = %line_id, "Moved wishlist item to cart");
        Ok(line_id)
    }
}
