//! Module to deal with the identity provider and the session it grants.
//!
//! The different submodules deal with:
//!
//! - the provider's REST surface (sign-in, sign-up, federated sign-in,
//!   liveness lookup, account deletion)
//! - the cached session and the gate deciding the start screen
//! - the login/registration flows reducing provider round-trips into a
//!   small observable state
//!

use clap::{crate_name, crate_version};

pub use client::*;
pub use error::*;
pub use flow::*;
pub use session::*;

mod client;
mod error;
mod flow;
mod session;

pub fn version() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}
