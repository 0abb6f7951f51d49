//! Error types for tenderboard.
//!
//! Grid operations (search, sort, paging, visibility) never fail: out-of-range
//! input is clamped. Errors only come from the edges of the crate: loading
//! configuration and fixtures, and the login flow.

use thiserror::Error;

/// The main error type for tenderboard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A table configuration was rejected during validation.
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    /// Fixture or configuration JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The email field does not look like an email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The backend refused the credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The authenticator could not reach the backend or returned garbage.
    #[error("Authentication request failed: {0}")]
    Transport(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
