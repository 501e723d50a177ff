//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Mock login gate (token derivation, identity persistence)
//! - `cart` - Cart manager (line items, totals, persistence)
//! - `theme` - Light/dark preference

pub mod auth;
pub mod cart;
pub mod theme;

pub use auth::{AuthError, AuthGate, Credentials};
pub use cart::CartManager;
pub use theme::{Theme, ThemePreference};
