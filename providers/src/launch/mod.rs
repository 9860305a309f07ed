//! One submodule per provider, all behind the [`Provider`] trait.
//!

pub use nammayatri::NammaYatri;
pub use ola::Ola;
pub use rapido::Rapido;
pub use uber::Uber;

mod nammayatri;
mod ola;
mod rapido;
mod uber;

use crate::Provider;

/// The built-in providers, in presentation order.  Conditional ones filter
/// themselves out through `covers()`.
///
pub fn builtin() -> Vec<Box<dyn Provider>> {
    vec![
        Box::new(Rapido),
        Box::new(Ola),
        Box::new(Uber),
        Box::new(NammaYatri),
    ]
}

/// Coordinate rendering for deep-link URIs.  Integral values keep one
/// decimal ("13.0", not "13"), the rendering the provider apps were built
/// against.
///
pub(crate) fn coord(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}
