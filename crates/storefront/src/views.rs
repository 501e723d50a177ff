//! View models for templates.
//!
//! Rendering is one-way: shop and catalog state are converted into these
//! plain structs, and the templates only ever read them.

use minicart_core::{CartLineItem, Product};

use crate::catalog::{CatalogState, LOAD_ERROR_MESSAGE};
use crate::models::Notice;
use crate::services::CartManager;
use crate::shop::Shop;

/// Header status shown when nobody is signed in.
pub const SIGNED_OUT_STATUS: &str = "You are not signed in";

/// Message shown in place of cart rows.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    /// Whether the "Add to cart" button is enabled.
    pub can_add: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, can_add: bool) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            can_add,
        }
    }
}

/// Catalog section display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub loading: bool,
    pub error: Option<String>,
    pub products: Vec<ProductCardView>,
}

impl CatalogView {
    #[must_use]
    pub fn new(state: &CatalogState, can_add: bool) -> Self {
        match state {
            CatalogState::Loading => Self {
                loading: true,
                error: None,
                products: Vec::new(),
            },
            CatalogState::Failed => Self {
                loading: false,
                error: Some(LOAD_ERROR_MESSAGE.to_string()),
                products: Vec::new(),
            },
            CatalogState::Ready(products) => Self {
                loading: false,
                error: None,
                products: products
                    .iter()
                    .map(|p| ProductCardView::new(p, can_add))
                    .collect(),
            },
        }
    }
}

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id().as_i32(),
            title: item.product.title.clone(),
            image: item.product.image.clone(),
            price: item.product.price.display(),
            quantity: item.quantity.get(),
            line_price: item.line_total().display(),
        }
    }
}

/// Cart panel display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// `Total: $x.xx`, empty when the cart is empty.
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartManager> for CartView {
    fn from(cart: &CartManager) -> Self {
        let total = if cart.is_empty() {
            String::new()
        } else {
            format!("Total: {}", cart.total().display())
        };

        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total,
            item_count: cart.item_count(),
        }
    }
}

/// Header display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub status_text: String,
    pub signed_in: bool,
    pub dark: bool,
}

/// Toast display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub level: &'static str,
    pub message: String,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            level: notice.level.as_str(),
            message: notice.message,
        }
    }
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header: HeaderView,
    pub catalog: CatalogView,
    pub cart: CartView,
    pub notices: Vec<NoticeView>,
}

impl PageView {
    /// Build the page from current state.
    ///
    /// `notices` are the ones drained from the shop for this render.
    #[must_use]
    pub fn new(
        shop: &Shop,
        catalog: &CatalogState,
        client_prefers_dark: bool,
        notices: Vec<Notice>,
    ) -> Self {
        let identity = shop.auth().identity();
        let signed_in = identity.is_some();

        Self {
            header: HeaderView {
                status_text: identity
                    .map_or_else(|| SIGNED_OUT_STATUS.to_string(), |i| i.status_text()),
                signed_in,
                dark: shop.theme(client_prefers_dark).is_dark(),
            },
            catalog: CatalogView::new(catalog, signed_in),
            cart: CartView::from(shop.cart()),
            notices: notices.into_iter().map(NoticeView::from).collect(),
        }
    }
}
