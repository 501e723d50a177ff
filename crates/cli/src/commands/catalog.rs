//! Catalog listing.

use minicart_storefront::catalog::CatalogClient;
use minicart_storefront::config::catalog_url_from_env;

use super::CliError;

/// Fetch the catalog and log one line per product.
pub async fn list() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let client = CatalogClient::new(catalog_url_from_env()?);
    tracing::info!("Fetching catalog from {}...", client.endpoint());

    let products = client.fetch_products().await?;
    for product in &products {
        tracing::info!(
            "#{:<4} {:<40} {:>10}  [{}]",
            product.id,
            product.title,
            product.price.display(),
            product.category
        );
    }
    tracing::info!("{} products", products.len());

    Ok(())
}
