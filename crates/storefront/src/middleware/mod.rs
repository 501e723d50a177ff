//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and sniffing protection)
//!
//! [`ColorScheme`] is an extractor rather than a layer: handlers that care
//! about the client's preferred theme ask for it.

pub mod color_scheme;
pub mod request_id;
pub mod security_headers;

pub use color_scheme::ColorScheme;
pub use request_id::{RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
