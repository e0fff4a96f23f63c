//! Glowcart Core - client-side state for the skincare storefront.
//!
//! This crate provides the state the storefront and admin dashboard render
//! from:
//! - `storefront` - Network side: order sync, catalog, user records, sessions
//! - `cli` - Command-line surface over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types, stores and pure view computations -
//! no I/O, no HTTP clients. Every mutation here is synchronous and cannot
//! fail; invariants (positive quantities, unique IDs) are enforced by the
//! stores themselves.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, statuses and the remote record shapes
//! - [`cart`] - Cart store
//! - [`favorites`] - Favorites store
//! - [`checkout`] - Checkout totals
//! - [`view`] - Filtering, sorting and pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod types;
pub mod view;

pub use cart::{Cart, CartLineItem};
pub use checkout::CheckoutSummary;
pub use favorites::{FavoriteItem, Favorites};
pub use types::*;
