//! This library is there to share some common code amongst all safar modules.
//!

use clap::{crate_name, crate_version};

pub use config::*;
pub use location::*;
pub use logging::*;

mod config;
mod location;
mod logging;

mod macros;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
