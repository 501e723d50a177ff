//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during the mock login.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// One or more required form fields were empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
