//! Cart store.
//!
//! Holds at most one line per product and never stores a quantity below one.
//! The total is derived from the lines on every read.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl CartLineItem {
    /// A line for a single unit of a product.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: 1,
            image: image.into(),
        }
    }

    /// Same line with a different quantity (clamped to at least one).
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<&Product> for CartLineItem {
    fn from(product: &Product) -> Self {
        Self::new(
            product.id,
            product.name.clone(),
            product.price,
            product.image_url.clone(),
        )
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a line, merging into an existing line with the same product ID.
    ///
    /// An incoming quantity of zero counts as one.
    pub fn add_item(&mut self, item: CartLineItem) {
        let quantity = item.quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(item.with_quantity(quantity));
        }
    }

    /// Remove the line for `id`. Removing an absent line is a no-op.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|line| line.id != id);
    }

    /// Overwrite the quantity of the line for `id`.
    ///
    /// Quantities below one are clamped to one; the cart never holds an empty
    /// line. Use [`Cart::remove_item`] to drop a line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = clamped;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace every line, e.g. when hydrating from a stored user record.
    ///
    /// Stored records are not trusted to uphold the cart invariants, so
    /// duplicate IDs are merged and zero quantities raised to one.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = CartLineItem>) {
        self.items.clear();
        for item in items {
            self.add_item(item);
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total number of units, as shown on the navbar badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i64, dollars: u32, quantity: u32) -> CartLineItem {
        CartLineItem::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::from_dollars(dollars),
            format!("https://cdn.example/{id}.png"),
        )
        .with_quantity(quantity)
    }

    #[test]
    fn test_add_existing_id_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 2));
        cart.add_item(line(2, 5, 1));
        cart.add_item(line(1, 10, 3));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 1);
        assert_eq!(cart.total(), Price::from_dollars(55));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(line(3, 1, 1));
        cart.add_item(line(1, 1, 1));
        cart.add_item(line(3, 1, 1));
        let ids: Vec<i64> = cart.items().iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = Cart::new();
        let mut item = line(1, 4, 1);
        item.quantity = 0;
        cart.add_item(item.clone());
        cart.add_item(item);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_repeated_adds_sum_per_id() {
        let mut cart = Cart::new();
        let adds = [(1, 2), (2, 1), (1, 1), (3, 4), (2, 2), (1, 3)];
        for (id, qty) in adds {
            cart.add_item(line(id, 1, qty));
        }
        for id in 1..=3 {
            let expected: u32 = adds
                .iter()
                .filter(|(i, _)| *i == id)
                .map(|(_, q)| q)
                .sum();
            let matching = cart.items().iter().filter(|l| l.id.as_i64() == id).count();
            assert_eq!(matching, 1);
            assert_eq!(cart.get(ProductId::new(id)).unwrap().quantity, expected);
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 1));
        cart.add_item(line(2, 10, 1));

        cart.remove_item(ProductId::new(1));
        let after_first = cart.clone();
        cart.remove_item(ProductId::new(1));

        assert_eq!(cart, after_first);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 1));
        let before = cart.clone();
        cart.remove_item(ProductId::new(99));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 4));
        for q in [0, -1, -7, i64::MIN] {
            cart.set_quantity(ProductId::new(1), q);
            assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
        }
    }

    #[test]
    fn test_set_quantity_only_touches_target() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 1));
        cart.add_item(line(2, 5, 1));
        cart.set_quantity(ProductId::new(2), 6);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 6);
        assert_eq!(cart.total(), Price::from_dollars(40));
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity(ProductId::new(1), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Price::ZERO);

        cart.add_item(CartLineItem::new(ProductId::new(1), "Toner", Price::from_cents(1250), ""));
        cart.add_item(line(2, 3, 3));
        assert_eq!(cart.total(), Price::from_cents(2150));

        cart.set_quantity(ProductId::new(1), 2);
        assert_eq!(cart.total(), Price::from_cents(3400));

        cart.remove_item(ProductId::new(2));
        assert_eq!(cart.total(), Price::from_dollars(25));

        let expected: Price = cart.items().iter().map(CartLineItem::line_total).sum();
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_replace_all_merges_duplicates_and_clamps() {
        let mut cart = Cart::new();
        cart.add_item(line(9, 1, 1));

        let mut zero = line(2, 5, 1);
        zero.quantity = 0;
        cart.replace_all(vec![line(1, 10, 2), zero, line(1, 10, 1)]);

        assert_eq!(cart.len(), 2);
        assert!(cart.get(ProductId::new(9)).is_none());
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_clear_and_item_count() {
        let mut cart = Cart::new();
        cart.add_item(line(1, 10, 2));
        cart.add_item(line(2, 10, 3));
        assert_eq!(cart.item_count(), 5);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_line_item_from_product() {
        let json = r#"{
            "id": 8,
            "name": "Cleanser",
            "price": 18.5,
            "imageUrl": "https://cdn.example/8.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let item = CartLineItem::from(&product);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image, "https://cdn.example/8.png");
        assert_eq!(item.line_total(), Price::from_cents(1850));
    }
}
