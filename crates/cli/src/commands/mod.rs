//! CLI command implementations.

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use glowcart_storefront::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The record store or catalog request failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Arguments that parse individually but make no sense together.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
