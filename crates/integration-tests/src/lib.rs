//! Integration tests for Minicart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minicart-integration-tests
//! ```
//!
//! Nothing external is needed: each test serves a fake catalog and a
//! storefront on ephemeral localhost ports, with storage in a temp dir.
//!
//! # Test Categories
//!
//! - `catalog_fetch` - Catalog client against fake endpoints
//! - `storefront_flow` - Full HTTP flows through the storefront
//! - `persistence` - State surviving a restart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use minicart_storefront::config::{
    DEFAULT_STORAGE_QUOTA_BYTES, StorageConfig, StorefrontConfig,
};
use minicart_storefront::routes::build_router;
use minicart_storefront::state::AppState;
use minicart_storefront::storage::FileStorage;
use tempfile::TempDir;
use url::Url;

/// Catalog body with two products in the remote wire format.
pub const SAMPLE_CATALOG: &str = r#"{
  "products": [
    {
      "id": 1,
      "title": "Essence Mascara Lash Princess",
      "price": 9.99,
      "category": "beauty",
      "thumbnail": "https://cdn.example.com/1/thumbnail.webp",
      "rating": 4.94
    },
    {
      "id": 2,
      "title": "Eyeshadow Palette with Mirror",
      "price": 19.99,
      "category": "beauty",
      "thumbnail": "https://cdn.example.com/2/thumbnail.webp"
    }
  ],
  "total": 2,
  "skip": 0,
  "limit": 30
}"#;

/// Serve `router` on an ephemeral localhost port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });

    addr
}

/// Serve a fixed catalog response at `/products`.
pub async fn spawn_catalog(status: StatusCode, body: &'static str) -> Url {
    let router = Router::new().route(
        "/products",
        get(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    let addr = spawn(router).await;
    Url::parse(&format!("http://{addr}/products")).expect("Invalid catalog URL")
}

/// A running storefront backed by a temp storage dir.
pub struct TestStorefront {
    pub base_url: String,
    pub state: AppState,
    pub storage_config: StorageConfig,
    data_dir: Arc<TempDir>,
}

impl TestStorefront {
    /// Start a storefront against `catalog_url` with fresh storage.
    ///
    /// The catalog is loaded before this returns.
    pub async fn start(catalog_url: Url) -> Self {
        let data_dir = Arc::new(TempDir::new().expect("Failed to create temp dir"));
        Self::start_in(catalog_url, data_dir).await
    }

    /// Start another storefront on the same storage dir, as after a restart.
    pub async fn restart(&self) -> Self {
        Self::start_in(
            self.state.config().catalog_url.clone(),
            Arc::clone(&self.data_dir),
        )
        .await
    }

    async fn start_in(catalog_url: Url, data_dir: Arc<TempDir>) -> Self {
        let storage_config = StorageConfig {
            data_dir: data_dir.path().to_path_buf(),
            quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
        };
        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            catalog_url,
            storage: storage_config.clone(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let storage = FileStorage::open(&storage_config).expect("Failed to open storage");

        let state = AppState::new(config, Arc::new(storage));
        state.reload_catalog().await;

        let addr = spawn(build_router(state.clone())).await;

        Self {
            base_url: format!("http://{addr}"),
            state,
            storage_config,
            data_dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Path of the backing storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.storage_config.file_path()
    }

    /// Read the storage file as JSON. An unwritten file reads as `{}`.
    #[must_use]
    pub fn stored(&self) -> serde_json::Value {
        match std::fs::read_to_string(self.storage_path()) {
            Ok(raw) => serde_json::from_str(&raw).expect("Storage file is not JSON"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => serde_json::json!({}),
            Err(e) => panic!("Failed to read storage: {e}"),
        }
    }
}

/// HTTP client that follows the storefront's redirects back to `/`.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
