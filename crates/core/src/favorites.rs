//! Favorites store with toggle semantics.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
}

impl From<&Product> for FavoriteItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image_url.clone(),
        }
    }
}

/// Set of favorited products, unique by ID, in the order they were added.
///
/// `items()` keeps insertion order, so removing and re-adding a product moves
/// it to the end. That order is not part of the store's state: equality is
/// set equality, and two stores holding the same items in a different order
/// compare equal.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: Vec<FavoriteItem>,
}

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|item| other.items.contains(item))
    }
}

impl Eq for Favorites {}

impl Favorites {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add the item if absent, remove it if present.
    ///
    /// Returns `true` when the item is a favorite after the call.
    pub fn toggle(&mut self, item: FavoriteItem) -> bool {
        if self.contains(item.id) {
            self.remove(item.id);
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Remove the item with `id`, whatever its toggle state.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace every favorite. The first occurrence of a duplicated ID wins.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = FavoriteItem>) {
        self.items.clear();
        for item in items {
            if !self.contains(item.id) {
                self.items.push(item);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    #[must_use]
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
