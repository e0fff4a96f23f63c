//! Glowcart storefront library.
//!
//! The network side of the storefront: the order store kept in sync with
//! the remote record store, the product catalog client, user records and the
//! signed-in session that owns a cart and favorites.
//!
//! All I/O goes through `reqwest`; state that only lives in memory (cart,
//! favorites, filters, pagination) comes from `glowcart-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod records;
pub mod session;
pub mod state;

pub use catalog::CatalogClient;
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
pub use error::{Result, StoreError};
pub use orders::{FetchOutcome, OrderBackend, OrderSnapshot, OrderStore};
pub use records::RecordsClient;
pub use session::Session;
pub use state::AppState;
