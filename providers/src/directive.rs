//! The launch directive itself, created fresh on every build and never
//! persisted.
//!

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Stable provider identifiers.
///
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, EnumString, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Rapido,
    Ola,
    Uber,
    NammaYatri,
}

/// How the caller is expected to hand off to the provider's app.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum LaunchMode {
    /// OS-level "open by URI" with a provider deep link.
    DeepLink(String),
    /// Copy the drop address to the clipboard, then launch the bare app.
    /// Used where coordinate deep links are not supported reliably.
    CopyAddressAndOpen,
}

/// One per-provider launch directive.
///
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Directive {
    pub id: ProviderKind,
    /// User-facing name
    pub provider: String,
    /// OS package identifier
    pub package: String,
    pub mode: LaunchMode,
    /// Always `None`, pricing lives in the provider apps.
    pub price: Option<u32>,
    /// Always empty, same reason.
    pub eta: String,
}
