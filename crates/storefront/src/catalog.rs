//! Skincare product catalog client.
//!
//! The catalog is a read-only JSON API. The whole product list is fetched in
//! one request and cached using `moka` (5-minute TTL by default); single
//! product lookups and category lists are served from that cached list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use glowcart_core::{Product, ProductId, distinct_categories};

use crate::config::CatalogConfig;
use crate::error::{Result, StoreError};
use crate::records::read_json;

/// Cache key for the full product list.
const ALL_PRODUCTS: &str = "products";

/// The catalog answers `{"data": [...]}`; some deployments return the bare
/// array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Wrapped { data: Vec<Product> },
    Bare(Vec<Product>),
}

impl CatalogPayload {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Client for the product catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig, timeout: Duration) -> Result<Self> {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.cache_ttl)
            .build();

        let mut endpoint = config.base_url.clone();
        if let Ok(mut path) = endpoint.path_segments_mut() {
            path.pop_if_empty().extend(["api", "data"]);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::builder().timeout(timeout).build()?,
                endpoint,
                cache,
            }),
        })
    }

    /// URL the product list is fetched from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Every product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns error if the list is not cached and the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>> {
        if let Some(products) = self.inner.cache.get(ALL_PRODUCTS).await {
            debug!(count = products.len(), "Cache hit for products");
            return Ok(products);
        }

        debug!(url = %self.inner.endpoint, "Fetching product catalog");
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;
        let payload: CatalogPayload = read_json(response).await?;
        let products = Arc::new(payload.into_products());

        self.inner
            .cache
            .insert(ALL_PRODUCTS, Arc::clone(&products))
            .await;
        debug!(count = products.len(), "Product catalog cached");

        Ok(products)
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the catalog has no such product.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.products()
            .await?
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("product {id}")))
    }

    /// Product categories in catalog order.
    ///
    /// # Errors
    ///
    /// Returns error if the product list cannot be loaded.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let products = self.products().await?;
        Ok(distinct_categories(&products)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Drop the cached list so the next read refetches.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(ALL_PRODUCTS).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(base: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            cache_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_endpoint_appends_api_data() {
        let catalog = config("https://skincare-api-psi.vercel.app");
        let client = CatalogClient::new(&catalog, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://skincare-api-psi.vercel.app/api/data"
        );
    }

    #[test]
    fn test_payload_accepts_both_shapes() {
        let wrapped: CatalogPayload =
            serde_json::from_str(r#"{"data":[{"id":1,"name":"Toner","price":18.5}]}"#).unwrap();
        let bare: CatalogPayload =
            serde_json::from_str(r#"[{"id":1,"name":"Toner","price":18.5}]"#).unwrap();

        assert_eq!(wrapped.into_products(), bare.into_products());
    }
}
