//! Rapido specifics
//!
//! No reliable coordinate deep link, so the directive asks the caller to
//! copy the drop address and open the bare app.
//!

use safar_common::Coordinate;

use crate::{LaunchMode, Provider, ProviderKind};

#[derive(Clone, Copy, Debug)]
pub struct Rapido;

impl Provider for Rapido {
    fn id(&self) -> ProviderKind {
        ProviderKind::Rapido
    }

    fn name(&self) -> &'static str {
        "Rapido"
    }

    fn package(&self) -> &'static str {
        "com.rapido.passenger"
    }

    fn launch(&self, _pickup: Coordinate, _drop: Coordinate) -> LaunchMode {
        LaunchMode::CopyAddressAndOpen
    }
}
