//! Mock sign-in commands.

use minicart_storefront::services::Credentials;
use secrecy::SecretString;

use super::{CliError, open_shop, report};

/// Sign in. Any non-empty name, email and password are accepted.
pub fn login(name: String, email: String, password: String) -> Result<(), CliError> {
    let mut shop = open_shop()?;
    let credentials = Credentials {
        name,
        email,
        password: SecretString::from(password),
    };

    let result = shop.login(&credentials);
    report(shop.take_notices());
    result?;
    Ok(())
}

/// Forget the stored identity.
pub fn logout() -> Result<(), CliError> {
    let mut shop = open_shop()?;
    shop.logout();
    report(shop.take_notices());
    Ok(())
}

/// Log the header status line.
pub fn status() -> Result<(), CliError> {
    let shop = open_shop()?;
    match shop.auth().identity() {
        Some(identity) => tracing::info!("{} <{}>", identity.status_text(), identity.email),
        None => tracing::info!("You are not signed in"),
    }
    Ok(())
}
