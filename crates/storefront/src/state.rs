//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use minicart_core::StorageAdapter;

use crate::catalog::{Catalog, CatalogClient};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::shop::Shop;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the shopper's state, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    catalog: Catalog,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Restores the shop from `storage`. The catalog starts in the `Loading`
    /// state; call [`AppState::start_catalog_load`] to fill it.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn StorageAdapter>) -> Self {
        let catalog_client = CatalogClient::new(config.catalog_url.clone());
        let shop = Shop::load(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog_client,
                catalog: Catalog::new(),
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the catalog HTTP client.
    #[must_use]
    pub fn catalog_client(&self) -> &CatalogClient {
        &self.inner.catalog_client
    }

    /// Lock the shopper's state for one operation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous handler panicked while
    /// holding the lock.
    pub fn shop(&self) -> Result<MutexGuard<'_, Shop>, AppError> {
        self.inner
            .shop
            .lock()
            .map_err(|_| AppError::Internal("shop lock poisoned".to_string()))
    }

    /// Fetch the catalog in a background task.
    ///
    /// Returns immediately; pages render a loading indicator until the
    /// task finishes.
    pub fn start_catalog_load(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            state.reload_catalog().await;
        })
    }

    /// Fetch the catalog and wait for the result.
    pub async fn reload_catalog(&self) {
        self.catalog().load(self.catalog_client()).await;
    }
}
