//! Checkout totals derived from the cart.

use crate::cart::Cart;
use crate::types::Price;

/// Subtotal strictly above which shipping is free, in dollars.
pub const FREE_SHIPPING_THRESHOLD: u32 = 100;

/// Flat shipping fee charged at or below the threshold, in dollars.
pub const FLAT_SHIPPING_FEE: u32 = 7;

/// Totals shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: u32,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Compute the summary from the current cart contents.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total();
        let shipping = shipping_for(subtotal);
        Self {
            item_count: cart.item_count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Shipping fee for a given subtotal.
#[must_use]
pub fn shipping_for(subtotal: Price) -> Price {
    if subtotal > Price::from_dollars(FREE_SHIPPING_THRESHOLD) {
        Price::ZERO
    } else {
        Price::from_dollars(FLAT_SHIPPING_FEE)
    }
}
