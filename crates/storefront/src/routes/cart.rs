//! Cart route handlers.
//!
//! Each handler applies one cart operation to the shop and redirects back
//! to the page.

use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use minicart_core::{ProductId, Quantity};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: ProductId,
}

/// Update quantity form data.
///
/// `quantity` is free text; anything unparseable counts as 1.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    pub quantity: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Add one unit of a catalog product.
///
/// Refused with a warning toast when nobody is signed in.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let product = state.catalog().find(form.id);
    let outcome = state.shop()?.add_to_cart(product.as_ref());

    tracing::info!(product_id = %form.id, ?outcome, "Add to cart");
    add_breadcrumb(
        "cart",
        "Add to cart",
        Some(&[("product_id", &form.id.to_string())]),
    );

    Ok(Redirect::to("/"))
}

/// Set a line's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let quantity = Quantity::parse_lenient(form.quantity.as_deref());
    state.shop()?.update_quantity(form.id, quantity);

    tracing::info!(product_id = %form.id, %quantity, "Cart quantity updated");
    Ok(Redirect::to("/"))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    state.shop()?.remove_from_cart(form.id);

    tracing::info!(product_id = %form.id, "Removed from cart");
    Ok(Redirect::to("/"))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Redirect> {
    state.shop()?.clear_cart();

    tracing::info!("Cart cleared");
    add_breadcrumb("cart", "Cart cleared", None);
    Ok(Redirect::to("/"))
}
