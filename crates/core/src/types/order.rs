//! Orders placed at checkout and managed from the admin dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus, Price, ProductId};

/// A placed order as persisted by the record store.
///
/// Orders are created by checkout submission; the client only reads them,
/// changes their status, or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_name: String,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total: Price,
    pub status: OrderStatus,
}

/// Snapshot of a cart line at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
}

impl Order {
    /// Copy of this order with `status` replaced, as sent in a full-body PUT.
    #[must_use]
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}
