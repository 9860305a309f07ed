//! Hand-off resolution.
//!
//! Turning a directive into the concrete steps the host has to take: what
//! goes on the clipboard, what to open first, what to fall back to when the
//! app is not installed.  Pure resolution, the side effects (clipboard
//! write, process launch) stay with the caller.
//!

use serde::{Deserialize, Serialize};

use crate::{Directive, LaunchMode};

/// One thing the OS can be asked to open.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Target {
    /// "Open by URI" request.
    Uri(String),
    /// "Launch installed app by identifier" request.
    Package(String),
}

/// A fully resolved hand-off.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchPlan {
    /// Text to copy before launching, for providers without deep links.
    pub clipboard: Option<String>,
    /// What to open first.
    pub primary: Target,
    /// One fallback, the provider's store listing.
    pub fallback: Target,
}

/// Store listing URI for a package.
///
pub fn store_listing(package: &str) -> String {
    format!("market://details?id={package}")
}

/// Resolve a directive into a launch plan.
///
/// `drop_address` feeds the clipboard for copy-address providers; an empty
/// or missing address simply skips the copy step.
///
#[tracing::instrument]
pub fn resolve(directive: &Directive, drop_address: Option<&str>) -> LaunchPlan {
    let fallback = Target::Uri(store_listing(&directive.package));

    match &directive.mode {
        LaunchMode::DeepLink(uri) => LaunchPlan {
            clipboard: None,
            primary: Target::Uri(uri.clone()),
            fallback,
        },
        LaunchMode::CopyAddressAndOpen => LaunchPlan {
            clipboard: drop_address
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_owned),
            primary: Target::Package(directive.package.clone()),
            fallback,
        },
    }
}
