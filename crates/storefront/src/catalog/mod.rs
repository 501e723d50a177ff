//! Product catalog: remote fetcher and the in-process catalog it fills.
//!
//! # Architecture
//!
//! - [`CatalogClient`] issues one `GET` per load and maps the raw records
//!   into display-ready [`Product`]s
//! - [`Catalog`] holds the current [`CatalogState`] and is populated by a
//!   background task at startup (and again on reload)
//! - No caching, pagination, or retry: a failed load leaves the catalog
//!   empty in the `Failed` state until the next load

mod client;
pub mod conversions;

pub use client::CatalogClient;

use std::sync::{Arc, RwLock};

use minicart_core::{Product, ProductId};
use thiserror::Error;

/// Inline message shown in place of the product grid after a failed load.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading products. Try reloading.";

/// Errors that can occur while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    /// A fetch is outstanding (or has not started yet).
    #[default]
    Loading,
    /// The last fetch succeeded.
    Ready(Vec<Product>),
    /// The last fetch failed; no products are available.
    Failed,
}

/// The shop's product catalog.
///
/// Cheaply cloneable; clones share state.
#[derive(Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<CatalogState>>,
}

impl Catalog {
    /// Create an empty catalog in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(CatalogState::Failed)
    }

    /// Look a product up in the ready catalog.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<Product> {
        let guard = self.inner.read().ok()?;
        match &*guard {
            CatalogState::Ready(products) => products.iter().find(|p| p.id == id).cloned(),
            CatalogState::Loading | CatalogState::Failed => None,
        }
    }

    fn set(&self, state: CatalogState) {
        match self.inner.write() {
            Ok(mut guard) => *guard = state,
            Err(_) => tracing::error!("Catalog lock poisoned, state not updated"),
        }
    }

    /// Re-fetch the full catalog with `client`.
    ///
    /// Failures are logged and leave the catalog empty in the `Failed` state;
    /// they are never returned to the caller.
    pub async fn load(&self, client: &CatalogClient) {
        self.set(CatalogState::Loading);

        match client.fetch_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog loaded");
                self.set(CatalogState::Ready(products));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                self.set(CatalogState::Failed);
            }
        }
    }

    /// Replace the catalog contents directly.
    pub fn set_products(&self, products: Vec<Product>) {
        self.set(CatalogState::Ready(products));
    }
}
