//! Raw catalog record conversion.

use minicart_core::{Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Response envelope of the catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<RawProduct>,
}

/// One product record as the catalog endpoint returns it.
///
/// The endpoint sends many more fields (stock, rating, images, ...); only the
/// ones the shop displays are read.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub thumbnail: String,
}

/// Convert raw records into display-ready products.
///
/// Records with a negative price are skipped.
pub fn convert_products(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter().filter_map(convert_product).collect()
}

fn convert_product(raw: RawProduct) -> Option<Product> {
    let price = match Price::new(raw.price) {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!(product_id = raw.id, error = %e, "Skipping catalog record");
            return None;
        }
    };

    Some(Product {
        id: ProductId::new(raw.id),
        description: describe(&raw.title, &raw.category),
        title: raw.title,
        price,
        category: raw.category,
        image: raw.thumbnail,
    })
}

/// Generated product blurb built from the first word of the title and the
/// category.
#[must_use]
pub fn describe(title: &str, category: &str) -> String {
    let first_word = title.split(' ').next().unwrap_or_default();
    format!("Discover {first_word}! A product from the {category} category. Quality guaranteed.")
}
