//! Mock shopper identity.
//!
//! Types stored for the mock login. None of this is a security mechanism.

use serde::{Deserialize, Serialize};

/// Name shown when a token exists but no display name was stored.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Email address as entered (not validated beyond being non-empty).
    pub email: String,
    /// Opaque token derived from email and name.
    pub token: String,
}

impl Identity {
    /// Status line for the page header.
    #[must_use]
    pub fn status_text(&self) -> String {
        format!("Signed in as {}", self.name)
    }
}
