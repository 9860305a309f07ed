//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Bad file version {0}")]
    BadFileVersion(usize),
    #[error("Missing configuration file, create {0}")]
    MissingConfig(String),
    #[error("Error reading configuration({0})")]
    MissingConfigParameter(String),
    #[error("No match for {0}")]
    NoSuchPlace(String),
    #[error("Bad coordinate fix {0}, expected LAT,LON")]
    BadFix(String),
    #[error("Both pickup and drop must be set, missing {0}")]
    MissingEndpoint(String),
    #[error("Provider {0} does not serve this trip")]
    NotServed(String),
}
