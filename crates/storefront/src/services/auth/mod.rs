//! Mock authentication gate.
//!
//! Login accepts any non-empty name, email and password and stores an opaque
//! token derived from the email and name. The token is base64 of
//! `email + name`: deterministic, trivially forgeable, and only used to
//! decide whether "add to cart" is enabled. It is not a security mechanism.
//! The password is never stored.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use minicart_core::StorageAdapter;
use secrecy::{ExposeSecret, SecretString};

use crate::models::Identity;
use crate::models::identity::DEFAULT_DISPLAY_NAME;
use crate::storage::keys;

/// Login form contents.
#[derive(Debug)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Derive the mock session token.
#[must_use]
pub fn derive_token(email: &str, name: &str) -> String {
    STANDARD.encode(format!("{email}{name}"))
}

/// Gate deciding whether the shopper may add to cart.
///
/// The identity read at startup (or set by login) is kept in memory and is
/// authoritative for the running process; storage writes are best effort.
pub struct AuthGate {
    storage: Arc<dyn StorageAdapter>,
    identity: Option<Identity>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    /// Create a gate from whatever identity is persisted in `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let identity = read_identity(storage.as_ref());
        Self { storage, identity }
    }

    /// Whether a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The signed-in shopper, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Accept the login form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if name, email or password is
    /// empty. The gate is left unchanged in that case.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&Identity, AuthError> {
        let name = credentials.name.trim();
        let email = credentials.email.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if email.is_empty() {
            missing.push("email");
        }
        if credentials.password.expose_secret().trim().is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            tracing::info!(?missing, "Login rejected");
            return Err(AuthError::MissingFields(missing));
        }

        let identity = Identity {
            name: name.to_string(),
            email: email.to_string(),
            token: derive_token(email, name),
        };

        for (key, value) in [
            (keys::TOKEN, identity.token.as_str()),
            (keys::USER_EMAIL, identity.email.as_str()),
            (keys::USER_NAME, identity.name.as_str()),
        ] {
            if let Err(e) = self.storage.set(key, value) {
                tracing::warn!(key, error = %e, "Failed to store identity field");
            }
        }

        tracing::info!(name = %identity.name, "Shopper signed in");
        Ok(self.identity.insert(identity))
    }

    /// Forget the identity and clear every stored identity field.
    pub fn logout(&mut self) {
        for key in [keys::TOKEN, keys::USER_EMAIL, keys::USER_NAME] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove identity field");
            }
        }
        if self.identity.take().is_some() {
            tracing::info!("Shopper signed out");
        }
    }
}

fn read_field(storage: &dyn StorageAdapter, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read identity field");
            None
        }
    }
}

fn read_identity(storage: &dyn StorageAdapter) -> Option<Identity> {
    let token = read_field(storage, keys::TOKEN)?;
    Some(Identity {
        name: read_field(storage, keys::USER_NAME)
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        email: read_field(storage, keys::USER_EMAIL).unwrap_or_default(),
        token,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minicart_core::MemoryStorage;

    use super::*;

    fn credentials(name: &str, email: &str, password: &str) -> Credentials {
        Credentials {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    fn gate() -> (MemoryStorage, AuthGate) {
        let storage = MemoryStorage::new();
        let gate = AuthGate::load(Arc::new(storage.clone()));
        (storage, gate)
    }

    #[test]
    fn test_token_is_base64_of_email_then_name() {
        assert_eq!(derive_token("a@b.c", "Ana"), "YUBiLmNBbmE=");
    }

    #[test]
    fn test_login_stores_identity_fields() {
        let (storage, mut gate) = gate();
        let identity = gate.login(&credentials("Ana", "a@b.c", "pw")).unwrap().clone();

        assert!(gate.is_authenticated());
        assert_eq!(identity.status_text(), "Signed in as Ana");
        assert_eq!(storage.get(keys::TOKEN).unwrap(), Some(identity.token));
        assert_eq!(storage.get(keys::USER_NAME).unwrap().as_deref(), Some("Ana"));
        assert_eq!(storage.get(keys::USER_EMAIL).unwrap().as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let (storage, mut gate) = gate();
        let err = gate.login(&credentials("Ana", "a@b.c", "")).unwrap_err();

        assert_eq!(err, AuthError::MissingFields(vec!["password"]));
        assert!(!gate.is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let (_, mut gate) = gate();
        let err = gate.login(&credentials(" ", "", "")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: name, email, password"
        );
    }

    #[test]
    fn test_logout_clears_storage() {
        let (storage, mut gate) = gate();
        gate.login(&credentials("Ana", "a@b.c", "pw")).unwrap();
        storage.set(keys::THEME, "dark").unwrap();

        gate.logout();

        assert!(!gate.is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
        assert!(storage.get(keys::USER_NAME).unwrap().is_none());
        assert!(storage.get(keys::USER_EMAIL).unwrap().is_none());
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_load_uses_default_name_when_missing() {
        let storage = MemoryStorage::new();
        storage.set(keys::TOKEN, "abc").unwrap();

        let gate = AuthGate::load(Arc::new(storage));
        let identity = gate.identity().unwrap();
        assert_eq!(identity.name, DEFAULT_DISPLAY_NAME);
        assert_eq!(identity.token, "abc");
    }

    #[test]
    fn test_load_without_token_is_signed_out() {
        let storage = MemoryStorage::new();
        storage.set(keys::USER_NAME, "Ana").unwrap();
        assert!(!AuthGate::load(Arc::new(storage)).is_authenticated());
    }
}
