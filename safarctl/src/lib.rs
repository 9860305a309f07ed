//! Library part of `safarctl`, exposes the command plumbing so integration
//! tests can drive it.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;
pub use trip::*;

mod cli;
mod cmds;
mod config;
mod error;
mod trip;
