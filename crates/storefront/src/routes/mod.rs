//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Shop page (header, catalog, cart, toasts)
//! GET  /health                 - Health check
//! GET  /static/*               - Stylesheet
//!
//! # Cart
//! POST /cart/add               - Add one unit (requires mock login)
//! POST /cart/update            - Set a line's quantity (clamped to >= 1)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Auth (mock)
//! POST /auth/login             - Accept name/email/password, store token
//! POST /auth/logout            - Clear stored identity
//!
//! # Misc
//! POST /theme/toggle           - Flip light/dark
//! POST /catalog/reload         - Re-fetch the catalog
//! ```
//!
//! Every `POST` answers `303 See Other` back to `/`, which re-renders the
//! page from state and shows any queued toasts.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod theme;

use axum::{
    Router,
    extract::Request,
    http::Uri,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{RequestId, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Mock auth routes
        .nest("/auth", auth_routes())
        .route("/theme/toggle", post(theme::toggle))
        .route("/catalog/reload", post(catalog::reload))
}

/// Build the complete application router with middleware.
///
/// Sentry layers are added by the binary, outside this router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri, request_id: RequestId) -> AppError {
    tracing::debug!(request_id = %request_id.0, path = %uri.path(), "No route");
    AppError::NotFound(uri.path().to_string())
}
