//! Core types for Glowcart.
//!
//! This module provides type-safe wrappers and records for the storefront
//! domain: IDs, prices, statuses, products, orders and user records.

pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use id::*;
pub use order::{Order, OrderItem};
pub use price::{NegativePriceError, Price};
pub use product::{Product, distinct_categories};
pub use status::*;
pub use user::{ProfileEdit, UserRecord};
