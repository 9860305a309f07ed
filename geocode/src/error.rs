//! Custom error type for the geocoding module, allow us to differentiate
//! between errors.  Callers degrade every one of these to an empty result,
//! none is surfaced as a user-facing failure.
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    HTTP(#[from] reqwest::Error),
    #[error("Bad HTTP status: {0}")]
    BadStatus(u16),
    #[error("Decoding response: {0}")]
    Decoding(String),
}
