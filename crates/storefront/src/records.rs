//! Record store API client.
//!
//! The record store is a plain key-value REST service: collections of JSON
//! records under `/orders` and `/users`, read and written with GET, PUT and
//! DELETE. There are no transactions; the last write to a record wins.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use glowcart_core::{Order, OrderId, ProfileEdit, UserId, UserRecord};

use crate::error::{Result, StoreError};
use crate::orders::OrderBackend;

/// Collection holding placed orders.
const ORDERS: &str = "orders";

/// Collection holding user records.
const USERS: &str = "users";

/// Longest slice of an error body kept in `RemoteRejected`.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the user/order record store.
#[derive(Clone)]
pub struct RecordsClient {
    inner: Arc<RecordsClientInner>,
}

struct RecordsClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl RecordsClient {
    /// Create a new record store client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(RecordsClientInner { client, base_url }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        // Config only accepts base URLs, so path segments are always available
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.inner.client.get(url).send().await?;
        read_json(response).await
    }

    async fn put_json<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, "PUT");
        let response = self.inner.client.put(url).json(body).send().await?;
        read_json(response).await
    }

    async fn delete(&self, url: Url) -> Result<()> {
        debug!(%url, "DELETE");
        let response = self.inner.client.delete(url).send().await?;
        check_status(response).await.map(drop)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch every order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a list of orders.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get_json(self.endpoint(&[ORDERS])).await
    }

    /// Replace an order with `order`, returning what the store persisted.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the store rejects the write.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn put_order(&self, order: &Order) -> Result<Order> {
        let echoed: Order = self
            .put_json(self.endpoint(&[ORDERS, order.id.as_str()]), order)
            .await?;
        if echoed.id != order.id {
            return Err(StoreError::MalformedResponse(format!(
                "PUT for order {} echoed order {}",
                order.id, echoed.id
            )));
        }
        Ok(echoed)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the store rejects the delete.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<()> {
        self.delete(self.endpoint(&[ORDERS, id.as_str()])).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Fetch every user record.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a list of users.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.get_json(self.endpoint(&[USERS])).await
    }

    /// Fetch one user record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the store has no such user, or
    /// another error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &UserId) -> Result<UserRecord> {
        match self.get_json(self.endpoint(&[USERS, id.as_str()])).await {
            Err(StoreError::RemoteRejected { status: 404, .. }) => {
                Err(StoreError::NotFound(format!("user {id}")))
            }
            other => other,
        }
    }

    /// Replace a user record, returning what the store persisted.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the store rejects the write.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn put_user(&self, user: &UserRecord) -> Result<UserRecord> {
        self.put_json(self.endpoint(&[USERS, user.id.as_str()]), user)
            .await
    }

    /// Change a user's account fields.
    ///
    /// Reads the current record first and writes it back with only the edited
    /// fields replaced, so cart, favorites and unknown profile fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the store has no such user, or
    /// another error if either request fails.
    #[instrument(skip(self, edit))]
    pub async fn edit_user(&self, id: &UserId, edit: ProfileEdit) -> Result<UserRecord> {
        let mut user = self.get_user(id).await?;
        user.apply_edit(edit);
        let saved = self.put_user(&user).await?;
        debug!("Updated user profile");
        Ok(saved)
    }

    /// Delete a user record.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the store rejects the delete.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.delete(self.endpoint(&[USERS, id.as_str()])).await
    }
}

impl OrderBackend for RecordsClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.list_orders().await
    }

    async fn store_order(&self, order: &Order) -> Result<Order> {
        self.put_order(order).await
    }

    async fn remove_order(&self, id: &OrderId) -> Result<()> {
        self.delete_order(id).await
    }
}

// =============================================================================
// Response handling
// =============================================================================

/// Turn non-success statuses into `RemoteRejected`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(
        status = %status,
        body = %body.chars().take(500).collect::<String>(),
        "Remote service returned non-success status"
    );
    Err(rejected(status, &body))
}

fn rejected(status: StatusCode, body: &str) -> StoreError {
    StoreError::RemoteRejected {
        status: status.as_u16(),
        message: body.chars().take(ERROR_BODY_LIMIT).collect(),
    }
}

/// Check the status, then parse the body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        warn!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse remote response"
        );
        StoreError::MalformedResponse(e.to_string())
    })
}
