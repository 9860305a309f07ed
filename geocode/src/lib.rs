//! Module to deal with the geocoding side of things.
//!
//! Two pieces live here:
//!
//! - a thin client for the public Nominatim search & reverse endpoints
//! - the debounced query sequencer coalescing keystrokes into at most one
//!   outstanding search
//!

use clap::{crate_name, crate_version};

pub use debounce::*;
pub use error::*;
pub use nominatim::*;

mod debounce;
mod error;
mod nominatim;

pub fn version() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}
