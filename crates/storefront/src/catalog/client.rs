//! HTTP client for the remote product catalog.

use std::sync::Arc;

use minicart_core::Product;
use tracing::instrument;
use url::Url;

use super::CatalogError;
use super::conversions::{ProductsEnvelope, convert_products};

/// Client for the product catalog endpoint.
///
/// Every call re-fetches the full catalog; nothing is cached.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    /// The catalog endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch and convert the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// that is not a product envelope.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let envelope: ProductsEnvelope = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        let products = convert_products(envelope.products);
        tracing::debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}
