//! The shopper's session: cart, mock identity, theme and pending notices.
//!
//! One [`Shop`] is built at startup from the storage adapter and owned by the
//! application state. Handlers lock it, apply one operation, and release it,
//! so operations never interleave.

use std::sync::Arc;

use minicart_core::{Product, ProductId, Quantity, StorageAdapter};

use crate::models::{Notice, Notices};
use crate::services::{AuthError, AuthGate, CartManager, Credentials, Theme, ThemePreference};

/// Result of an add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was added (or its quantity incremented).
    Added,
    /// Nobody is signed in; the cart is unchanged.
    LoginRequired,
    /// The product is not in the catalog; the cart is unchanged.
    UnknownProduct,
}

/// Controller state for one shopper.
#[derive(Debug)]
pub struct Shop {
    cart: CartManager,
    auth: AuthGate,
    theme: ThemePreference,
    notices: Notices,
}

impl Shop {
    /// Restore cart, identity and theme from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let cart = CartManager::load(Arc::clone(&storage));
        let auth = AuthGate::load(Arc::clone(&storage));
        let theme = ThemePreference::load(storage);

        tracing::info!(
            cart_lines = cart.len(),
            signed_in = auth.is_authenticated(),
            "Shop state restored"
        );

        Self {
            cart,
            auth,
            theme,
            notices: Notices::default(),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Theme to render for a client with the given preference.
    #[must_use]
    pub fn theme(&self, client_prefers_dark: bool) -> Theme {
        self.theme.resolve(client_prefers_dark)
    }

    /// Take every pending notice, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Add one unit of `product` if the shopper is signed in.
    ///
    /// `product` is `None` when the requested ID is not in the catalog.
    pub fn add_to_cart(&mut self, product: Option<&Product>) -> AddOutcome {
        if !self.auth.is_authenticated() {
            self.notices
                .warn("You must sign in to add items to the cart");
            return AddOutcome::LoginRequired;
        }

        let Some(product) = product else {
            self.notices.error("That product is no longer available");
            return AddOutcome::UnknownProduct;
        };

        self.cart.add_item(product);
        self.notices.success("Item added to cart");
        AddOutcome::Added
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove_item(id);
    }

    pub fn update_quantity(&mut self, id: ProductId, quantity: Quantity) {
        self.cart.update_quantity(id, quantity);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notices.warn("Cart emptied");
    }

    /// Submit the login form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty; an error
    /// notice is queued as well.
    pub fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        match self.auth.login(credentials) {
            Ok(identity) => {
                let message = format!("Welcome, {}!", identity.name);
                self.notices.success(message);
                Ok(())
            }
            Err(e) => {
                self.notices.error("Please fill in all fields");
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.notices.warn("Signed out");
    }

    /// Flip the theme for a client with the given preference.
    pub fn toggle_theme(&mut self, client_prefers_dark: bool) -> Theme {
        self.theme.toggle(client_prefers_dark)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minicart_core::{MemoryStorage, Price};
    use secrecy::SecretString;

    use super::*;
    use crate::models::NoticeLevel;
    use crate::storage::keys;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            category: "misc".to_string(),
            image: String::new(),
            description: String::new(),
        }
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    fn shop() -> (MemoryStorage, Shop) {
        let storage = MemoryStorage::new();
        let shop = Shop::load(Arc::new(storage.clone()));
        (storage, shop)
    }

    #[test]
    fn test_add_requires_login() {
        let (_, mut shop) = shop();
        let outcome = shop.add_to_cart(Some(&product(1, 1000)));

        assert_eq!(outcome, AddOutcome::LoginRequired);
        assert!(shop.cart().is_empty());
        let notices = shop.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warn);
    }

    #[test]
    fn test_rejected_login_keeps_add_disabled() {
        let (storage, mut shop) = shop();
        assert!(shop.login(&credentials("")).is_err());

        assert!(!shop.auth().is_authenticated());
        assert!(storage.get(keys::TOKEN).unwrap().is_none());
        assert_eq!(
            shop.add_to_cart(Some(&product(1, 1000))),
            AddOutcome::LoginRequired
        );

        let levels: Vec<_> = shop.take_notices().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Error, NoticeLevel::Warn]);
    }

    #[test]
    fn test_signed_in_add_twice() {
        let (_, mut shop) = shop();
        shop.login(&credentials("secret")).unwrap();
        let p = product(1, 1000);

        assert_eq!(shop.add_to_cart(Some(&p)), AddOutcome::Added);
        assert_eq!(shop.add_to_cart(Some(&p)), AddOutcome::Added);

        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.cart().total(), Price::from_cents(2000).unwrap());

        let notices = shop.take_notices();
        assert_eq!(notices[0].message, "Welcome, Ana!");
        assert_eq!(notices[1].message, "Item added to cart");
        assert_eq!(notices.len(), 3);
    }

    #[test]
    fn test_unknown_product_leaves_cart_alone() {
        let (_, mut shop) = shop();
        shop.login(&credentials("secret")).unwrap();
        assert_eq!(shop.add_to_cart(None), AddOutcome::UnknownProduct);
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_clear_cart_warns_and_persists_empty_list() {
        let (storage, mut shop) = shop();
        shop.login(&credentials("secret")).unwrap();
        shop.add_to_cart(Some(&product(1, 100)));
        shop.take_notices();

        shop.clear_cart();

        assert!(shop.cart().is_empty());
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
        let notices = shop.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Warn);
        assert_eq!(notices[0].message, "Cart emptied");
    }

    #[test]
    fn test_state_survives_reload() {
        let (storage, mut shop) = shop();
        shop.login(&credentials("secret")).unwrap();
        shop.add_to_cart(Some(&product(4, 250)));
        shop.toggle_theme(false);

        let reloaded = Shop::load(Arc::new(storage));
        assert!(reloaded.auth().is_authenticated());
        assert_eq!(reloaded.cart().item_count(), 1);
        assert_eq!(reloaded.theme(false), Theme::Dark);
    }

    #[test]
    fn test_logout_disables_add() {
        let (_, mut shop) = shop();
        shop.login(&credentials("secret")).unwrap();
        shop.logout();
        assert_eq!(
            shop.add_to_cart(Some(&product(1, 100))),
            AddOutcome::LoginRequired
        );
    }
}
