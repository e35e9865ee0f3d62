use crate::domain::ids::ProductId;

use super::value_objects::CatalogItem;

/// Read-only view over the sellable items loaded from the backend.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: ProductId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Exact, case-insensitive name match
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category.eq_ignore_ascii_case(category))
    }

    pub fn in_stock(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.in_stock)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
