//! Integration tests for Glowcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p glowcart-integration-tests
//! ```
//!
//! No external services are needed: every test starts a [`FakeRemote`], an
//! in-process `axum` server on `127.0.0.1:0` that serves both the record
//! store (`/orders`, `/users`) and the product catalog (`/api/data`) from
//! memory, and points the real `reqwest` clients at it.
//!
//! # Test Categories
//!
//! - `orders` - Order store sync, stale fetches, failure handling
//! - `catalog` - Product catalog fetch and caching
//! - `session` - Sign-in hydration and profile sync
//! - `users` - User record administration

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use glowcart_storefront::config::CatalogConfig;
use glowcart_storefront::{CatalogClient, RecordsClient, Result};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Timeout used by clients built against the fake.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory contents and failure switches of the fake services.
#[derive(Debug, Default)]
pub struct FakeState {
    pub orders: Vec<Value>,
    pub users: Vec<Value>,
    pub products: Vec<Value>,
    /// Answer every PUT and DELETE with a 500.
    pub fail_writes: bool,
    /// Answer `GET /orders` with a body that is not a list of orders.
    pub malformed_orders: bool,
    /// Delays applied to successive `GET /orders` requests. The orders are
    /// read before the delay, so a delayed response carries old data.
    pub order_fetch_delays: VecDeque<Duration>,
    pub catalog_requests: usize,
    pub write_requests: usize,
}

type Shared = Arc<Mutex<FakeState>>;

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running fake record store and catalog.
///
/// The server task is aborted when this is dropped.
pub struct FakeRemote {
    url: Url,
    state: Shared,
    server: JoinHandle<()>,
}

impl FakeRemote {
    /// Bind to an ephemeral port and start serving `state`.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn start(state: FakeState) -> std::io::Result<Self> {
        let state = Arc::new(Mutex::new(state));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = base_url(listener.local_addr()?)?;

        let app = router(Arc::clone(&state));
        let server = tokio::spawn(async move {
            // Only ends when the task is aborted
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { url, state, server })
    }

    /// Base URL of the fake, usable for both the record store and catalog.
    #[must_use]
    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// Lock the fake's state to inspect or change it.
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        lock(&self.state)
    }

    /// Record store client pointed at this fake.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn records(&self) -> Result<RecordsClient> {
        RecordsClient::new(self.url(), CLIENT_TIMEOUT)
    }

    /// Catalog client pointed at this fake.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn catalog(&self, cache_ttl: Duration) -> Result<CatalogClient> {
        let config = CatalogConfig {
            base_url: self.url(),
            cache_ttl,
        };
        CatalogClient::new(&config, CLIENT_TIMEOUT)
    }
}

fn base_url(addr: SocketAddr) -> std::io::Result<Url> {
    Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)
}

impl Drop for FakeRemote {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// An order record as the record store holds it.
#[must_use]
pub fn order_json(id: &str, user_name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "userName": user_name,
        "date": "2025-10-12T09:30:00Z",
        "items": [{ "id": 1, "name": "Hydrating Serum", "quantity": 2 }],
        "total": 40,
        "status": status,
    })
}

/// A user record with extra profile fields the client does not model.
#[must_use]
pub fn user_json(id: &str, name: &str, cart: &Value, favorites: &Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "password": "Secret123",
        "phone": "01000000000",
        "cart": cart,
        "favorites": favorites,
    })
}

/// A catalog product.
#[must_use]
pub fn product_json(id: i64, name: &str, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} for every skin type"),
        "size": "50ml",
        "price": price,
        "category": category,
        "imageUrl": format!("https://cdn.example.com/{id}.png"),
        "isBestseller": id % 2 == 0,
        "isNewFormula": false,
    })
}

// =============================================================================
// Routes
// =============================================================================

fn router(state: Shared) -> Router {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}", put(put_order).delete(delete_order))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).put(put_user).delete(delete_user))
        .route("/api/data", get(catalog))
        .with_state(state)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!("Not found"))).into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "record store unavailable").into_response()
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

async fn list_orders(State(state): State<Shared>) -> Response {
    let (orders, delay, malformed) = {
        let mut state = lock(&state);
        let delay = state.order_fetch_delays.pop_front();
        (state.orders.clone(), delay, state.malformed_orders)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if malformed {
        return Json(json!({ "orders": "not a list" })).into_response();
    }
    Json(orders).into_response()
}

type Collection = fn(&mut FakeState) -> &mut Vec<Value>;

/// Replace the record with `id`, echoing what was stored.
fn replace(state: &Shared, pick: Collection, id: &str, body: Value) -> Response {
    let mut state = lock(state);
    state.write_requests += 1;
    if state.fail_writes {
        return server_error();
    }
    let Some(slot) = pick(&mut state).iter_mut().find(|r| has_id(r, id)) else {
        return not_found();
    };
    *slot = body;
    if let Some(fields) = slot.as_object_mut() {
        fields.insert("id".to_string(), json!(id));
    }
    Json(slot.clone()).into_response()
}

fn remove(state: &Shared, pick: Collection, id: &str) -> Response {
    let mut state = lock(state);
    state.write_requests += 1;
    if state.fail_writes {
        return server_error();
    }
    let records = pick(&mut state);
    let Some(index) = records.iter().position(|r| has_id(r, id)) else {
        return not_found();
    };
    Json(records.remove(index)).into_response()
}

async fn put_order(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    replace(&state, |s| &mut s.orders, &id, body)
}

async fn delete_order(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    remove(&state, |s| &mut s.orders, &id)
}

async fn list_users(State(state): State<Shared>) -> Response {
    Json(lock(&state).users.clone()).into_response()
}

async fn get_user(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    lock(&state)
        .users
        .iter()
        .find(|u| has_id(u, &id))
        .map_or_else(not_found, |u| Json(u.clone()).into_response())
}

async fn put_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    replace(&state, |s| &mut s.users, &id, body)
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    remove(&state, |s| &mut s.users, &id)
}

async fn catalog(State(state): State<Shared>) -> Response {
    let mut state = lock(&state);
    state.catalog_requests += 1;
    Json(json!({ "data": state.products })).into_response()
}
