//! Theme toggle handler.

use axum::{extract::State, response::Redirect};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::ColorScheme;
use crate::state::AppState;

/// Flip between light and dark.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>, scheme: ColorScheme) -> Result<Redirect> {
    let theme = state.shop()?.toggle_theme(scheme.prefers_dark);
    tracing::debug!(theme = theme.as_str(), "Theme toggled");
    Ok(Redirect::to("/"))
}
