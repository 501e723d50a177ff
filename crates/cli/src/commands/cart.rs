//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! minicart cart add 3
//! minicart cart set 3 5
//! minicart cart remove 3
//! minicart cart clear
//! ```

use minicart_core::{ProductId, Quantity};
use minicart_storefront::catalog::CatalogClient;
use minicart_storefront::config::catalog_url_from_env;
use minicart_storefront::shop::{AddOutcome, Shop};

use super::{CliError, open_shop, report};

/// Log every cart line and the total.
pub fn show() -> Result<(), CliError> {
    let shop = open_shop()?;
    log_cart(&shop);
    Ok(())
}

/// Add one unit of a catalog product.
///
/// The catalog is fetched first so the stored line carries current details.
pub async fn add(id: ProductId) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    if !shop.auth().is_authenticated() {
        return Err(CliError::LoginRequired);
    }

    let client = CatalogClient::new(catalog_url_from_env()?);
    let products = client.fetch_products().await?;
    let product = products.iter().find(|p| p.id == id);

    let outcome = shop.add_to_cart(product);
    report(shop.take_notices());

    match outcome {
        AddOutcome::Added => {
            log_cart(&shop);
            Ok(())
        }
        AddOutcome::LoginRequired => Err(CliError::LoginRequired),
        AddOutcome::UnknownProduct => Err(CliError::UnknownProduct(id)),
    }
}

/// Remove a line.
pub fn remove(id: ProductId) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    if shop.cart().get(id).is_none() {
        tracing::warn!("Product {id} is not in the cart");
    }
    shop.remove_from_cart(id);
    log_cart(&shop);
    Ok(())
}

/// Set a line's quantity from free text.
pub fn set(id: ProductId, quantity: &str) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    let quantity = Quantity::parse_lenient(Some(quantity));
    shop.update_quantity(id, quantity);
    log_cart(&shop);
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CliError> {
    let mut shop = open_shop()?;
    shop.clear_cart();
    report(shop.take_notices());
    Ok(())
}

fn log_cart(shop: &Shop) {
    let cart = shop.cart();
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    for item in cart.items() {
        tracing::info!(
            "#{:<4} {:<40} {} x {} = {}",
            item.id(),
            item.product.title,
            item.quantity,
            item.product.price.display(),
            item.line_total().display()
        );
    }
    tracing::info!("Total: {} ({} items)", cart.total().display(), cart.item_count());
}
