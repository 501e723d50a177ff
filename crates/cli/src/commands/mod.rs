//! CLI command implementations.
//!
//! Every command opens the storage file the storefront uses, restores the
//! shop from it, applies one operation, and logs the resulting notices.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod theme;

use std::sync::Arc;

use minicart_core::{ProductId, StorageError};
use minicart_storefront::catalog::CatalogError;
use minicart_storefront::config::{ConfigError, StorageConfig};
use minicart_storefront::models::{Notice, NoticeLevel};
use minicart_storefront::services::AuthError;
use minicart_storefront::shop::Shop;
use minicart_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The storage file could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The catalog could not be fetched.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The sign-in form was incomplete.
    #[error("Sign-in rejected: {0}")]
    Auth(#[from] AuthError),

    /// Adding requires a signed-in shopper.
    #[error("Sign in first: minicart auth login -n <name> -e <email> -p <password>")]
    LoginRequired,

    /// The product ID is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Open the configured storage file and restore the shop from it.
fn open_shop() -> Result<Shop, CliError> {
    dotenvy::dotenv().ok();

    let config = StorageConfig::from_env()?;
    let storage = FileStorage::open(&config)?;
    tracing::debug!(path = %storage.path().display(), "Storage opened");

    Ok(Shop::load(Arc::new(storage)))
}

/// Log notices at the level matching their kind.
fn report(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Warn => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}
