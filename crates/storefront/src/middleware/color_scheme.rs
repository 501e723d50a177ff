//! Client color scheme preference.
//!
//! Browsers that support user-agent client hints send
//! `Sec-CH-Prefers-Color-Scheme: dark|light` once the server asks for it via
//! `Accept-CH`. It stands in for the `prefers-color-scheme` media query when
//! no theme has been saved yet.

use axum::{extract::FromRequestParts, http::request::Parts};

/// Request header carrying the hint.
pub const PREFERS_COLOR_SCHEME_HEADER: &str = "sec-ch-prefers-color-scheme";

/// The client's preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorScheme {
    pub prefers_dark: bool,
}

impl ColorScheme {
    /// Read the hint from a header value. Quotes are allowed, as browsers send
    /// structured-field strings (`"dark"`).
    #[must_use]
    pub fn from_header_value(value: &str) -> Self {
        let value = value.trim().trim_matches('"');
        Self {
            prefers_dark: value.eq_ignore_ascii_case("dark"),
        }
    }
}

impl<S> FromRequestParts<S> for ColorScheme
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(PREFERS_COLOR_SCHEME_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(Self::from_header_value)
            .unwrap_or_default())
    }
}
