//! Order store synchronized with the remote record store.
//!
//! The remote store is authoritative. The local collection is a cache that
//! is replaced on every successful fetch and patched only with what the
//! remote store confirms: a failed request never touches local state.
//!
//! # Concurrency
//!
//! Operations may be in flight together. No lock is held across a network
//! await, so updates and deletes on different orders never wait on each
//! other. Two writes to the same order race at the remote store, and the last
//! one to complete decides the local copy.
//!
//! A `fetch_all` that is overtaken by a newer `fetch_all` has its result
//! dropped, so a slow early response cannot roll the cache back.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument, warn};

use glowcart_core::{LoadState, Order, OrderId, OrderStatus};

use crate::error::{Result, StoreError};

/// Remote operations the order store depends on.
///
/// Implemented by [`crate::records::RecordsClient`] over HTTP.
pub trait OrderBackend: Send + Sync + 'static {
    /// `GET /orders`
    fn fetch_orders(&self) -> impl Future<Output = Result<Vec<Order>>> + Send;

    /// `PUT /orders/{id}` with the full order; resolves to the persisted order.
    fn store_order(&self, order: &Order) -> impl Future<Output = Result<Order>> + Send;

    /// `DELETE /orders/{id}`
    fn remove_order(&self, id: &OrderId) -> impl Future<Output = Result<()>> + Send;
}

/// Outcome of a [`OrderStore::fetch_all`] that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache now holds this many orders.
    Applied(usize),
    /// A newer fetch was issued before this one resolved; its result was
    /// dropped.
    Superseded,
}

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub orders: Vec<Order>,
    pub load_state: LoadState,
}

/// Cached orders plus the fetch lifecycle.
///
/// Cheap to clone; clones share the same cache.
pub struct OrderStore<B> {
    inner: Arc<OrderStoreInner<B>>,
}

impl<B> Clone for OrderStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct OrderStoreInner<B> {
    backend: B,
    state: RwLock<OrderSnapshot>,
    /// Sequence number of the most recently issued fetch.
    latest_fetch: AtomicU64,
}

impl<B: OrderBackend> OrderStore<B> {
    /// Create an empty, idle store.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            inner: Arc::new(OrderStoreInner {
                backend,
                state: RwLock::new(OrderSnapshot::default()),
                latest_fetch: AtomicU64::new(0),
            }),
        }
    }

    /// The backend this store synchronizes with.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    // A panic while holding the lock cannot leave the snapshot half-written:
    // every write replaces whole fields, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, OrderSnapshot> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrderSnapshot> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the cached orders and load state.
    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshot {
        self.read().clone()
    }

    /// Copy of the cached orders.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.read().orders.clone()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.read().load_state.clone()
    }

    /// Cached order with `id`, if any.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.read().orders.iter().find(|order| order.id == *id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().orders.is_empty()
    }

    /// Reload every order from the remote store.
    ///
    /// Moves the store to `Loading`, then to `Ready` with the fetched orders
    /// or to `Error` with the previous orders kept. A fetch overtaken by a
    /// newer one resolves to [`FetchOutcome::Superseded`] whether it
    /// succeeded or failed, and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the remote failure of a fetch that was still the latest.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<FetchOutcome> {
        // Sequence and `Loading` change under one guard: a later-issued fetch
        // always marks the store after this one does
        let seq = {
            let mut state = self.write();
            state.load_state = LoadState::Loading;
            self.inner.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.inner.backend.fetch_orders().await;

        let mut state = self.write();
        if self.inner.latest_fetch.load(Ordering::SeqCst) != seq {
            debug!(seq, ok = result.is_ok(), "Discarding superseded order fetch");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(orders) => {
                let count = orders.len();
                state.orders = orders;
                state.load_state = LoadState::Ready;
                drop(state);
                debug!(count, "Order cache replaced");
                Ok(FetchOutcome::Applied(count))
            }
            Err(e) => {
                state.load_state = LoadState::Error(e.to_string());
                drop(state);
                warn!(error = %e, "Failed to fetch orders");
                Err(e)
            }
        }
    }

    /// Change an order's status.
    ///
    /// Sends the cached order with the new status and, once the remote store
    /// confirms, replaces the cached copy with the order it echoed back.
    /// Saving the status an order already has sends nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the order is not cached, or the
    /// remote failure. The cache is unchanged on error.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let current = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {id}")))?;

        if current.status == status {
            debug!("Status unchanged, skipping update");
            return Ok(current);
        }

        let echoed = self
            .inner
            .backend
            .store_order(&current.with_status(status))
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to update order status"))?;

        let mut state = self.write();
        // An order deleted while the PUT was in flight stays deleted
        if let Some(slot) = state.orders.iter_mut().find(|order| order.id == echoed.id) {
            *slot = echoed.clone();
        }
        drop(state);

        Ok(echoed)
    }

    /// Delete an order remotely, then drop it from the cache.
    ///
    /// Deleting an order that is not cached still issues the request.
    ///
    /// # Errors
    ///
    /// Returns the remote failure. The cache is unchanged on error.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<()> {
        self.inner
            .backend
            .remove_order(id)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to delete order"))?;

        self.write().orders.retain(|order| order.id != *id);
        Ok(())
    }
}
