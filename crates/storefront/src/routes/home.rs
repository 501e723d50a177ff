//! Shop page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::ColorScheme;
use crate::state::AppState;
use crate::views::PageView;

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageView,
}

/// Render the shop page from current state.
///
/// Drains the queued toasts, so each one is shown exactly once.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, scheme: ColorScheme) -> Result<IndexTemplate> {
    let catalog = state.catalog().state();
    let mut shop = state.shop()?;
    let notices = shop.take_notices();
    let page = PageView::new(&shop, &catalog, scheme.prefers_dark, notices);
    drop(shop);

    Ok(IndexTemplate { page })
}
