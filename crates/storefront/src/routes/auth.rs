//! Mock login route handlers.

use axum::{Form, extract::State, response::Redirect};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::services::Credentials;
use crate::state::AppState;

/// Login form data.
///
/// Missing fields deserialize as empty strings so they are reported through
/// the usual validation toast instead of a form rejection.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: SecretString::from(form.password),
        }
    }
}

/// Handle the login form.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let credentials = Credentials::from(form);
    // A rejected form has already queued its toast
    if let Err(e) = state.shop()?.login(&credentials) {
        tracing::debug!(error = %e, "Login form rejected");
    }
    Ok(Redirect::to("/"))
}

/// Handle logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect> {
    state.shop()?.logout();
    Ok(Redirect::to("/"))
}
