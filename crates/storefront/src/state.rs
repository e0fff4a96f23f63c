//! Application state shared across commands and tasks.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::orders::OrderStore;
use crate::records::RecordsClient;

/// Clients and stores shared by everything that talks to the backend.
///
/// This struct is cheaply cloneable via `Arc`; clones share the order cache
/// and the catalog cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    records: RecordsClient,
    catalog: CatalogClient,
    orders: OrderStore<RecordsClient>,
}

impl AppState {
    /// Build the HTTP clients and an empty order store.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let records = RecordsClient::new(config.records_url.clone(), config.http_timeout)?;
        let catalog = CatalogClient::new(&config.catalog, config.http_timeout)?;
        let orders = OrderStore::new(records.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                records,
                catalog,
                orders,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Record store client for user records.
    #[must_use]
    pub fn records(&self) -> &RecordsClient {
        &self.inner.records
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Shared order cache for the admin dashboard.
    #[must_use]
    pub fn orders(&self) -> &OrderStore<RecordsClient> {
        &self.inner.orders
    }
}
