//! Catalog products and cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A catalog product in display-ready shape.
///
/// Products are immutable once fetched; the catalog fetcher is the only
/// producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    /// Image URL (the catalog's thumbnail).
    pub image: String,
    pub description: String,
}

/// A cart entry: a product snapshot plus how many of it.
///
/// Serialized flat, with the quantity under `qty`, matching the stored cart
/// layout: `{"id":1,"title":"...","price":"9.99",...,"qty":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "qty")]
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Create a line item with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// The product ID of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
