//! Light/dark theme preference.
//!
//! Stored under the `theme` key as `dark` or `light`. With nothing stored,
//! the client's preferred color scheme decides.

use std::sync::Arc;

use minicart_core::StorageAdapter;

use crate::storage::keys;

/// Page color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything unrecognized is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Persisted theme choice.
pub struct ThemePreference {
    storage: Arc<dyn StorageAdapter>,
    saved: Option<Theme>,
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Read the saved choice from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let saved = match storage.get(keys::THEME) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme");
                None
            }
        };
        Self { storage, saved }
    }

    /// The explicitly saved theme, if any.
    #[must_use]
    pub const fn saved(&self) -> Option<Theme> {
        self.saved
    }

    /// The theme to render: the saved choice, else the client preference.
    #[must_use]
    pub fn resolve(&self, client_prefers_dark: bool) -> Theme {
        self.saved.unwrap_or(if client_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
    }

    /// Flip the currently rendered theme and save the result.
    pub fn toggle(&mut self, client_prefers_dark: bool) -> Theme {
        let next = self.resolve(client_prefers_dark).toggled();
        self.saved = Some(next);
        if let Err(e) = self.storage.set(keys::THEME, next.as_str()) {
            tracing::warn!(error = %e, "Failed to save theme");
        }
        next
    }
}
