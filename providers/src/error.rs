//! Custom error type for hand-off, allow us to differentiate between errors.
//!

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("{0}: App not installed")]
    AppNotInstalled(String),
}
