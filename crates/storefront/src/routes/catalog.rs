//! Catalog reload handler.

use axum::{extract::State, response::Redirect};
use tracing::instrument;

use crate::state::AppState;

/// Re-fetch the full catalog, then show the page.
///
/// A failed fetch is shown inline on the page; this handler itself cannot
/// fail.
#[instrument(skip(state))]
pub async fn reload(State(state): State<AppState>) -> Redirect {
    state.reload_catalog().await;
    Redirect::to("/")
}
