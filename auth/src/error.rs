//! Custom error type for authentication, allow us to differentiate between
//! errors.  Validation errors surface inline before any network call.
//!

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill all fields")]
    EmptyFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("{0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("No cached session")]
    NoSession,
    #[error("Session expired")]
    Expired,
}
