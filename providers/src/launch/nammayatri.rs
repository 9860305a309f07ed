//! Namma Yatri specifics
//!
//! Bangalore-only service: included iff either endpoint falls inside a
//! coarse box around the city centre (0.5 degrees, roughly 55 km).  Whether
//! that box is a permanent business rule or a placeholder for a real
//! service-area lookup is a stakeholder question, not ours to guess.
//!
//! Like Rapido, no reliable coordinate deep link: copy address, open app.
//!

use safar_common::{BoundingBox, Coordinate};

use crate::{LaunchMode, Provider, ProviderKind};

/// Bangalore city centre.
const BLR_CENTER: Coordinate = Coordinate {
    lat: 12.9716,
    lon: 77.5946,
};

/// Half-size of the service box, in degrees.
const BLR_HALF_DEG: f64 = 0.5;

#[derive(Clone, Copy, Debug)]
pub struct NammaYatri;

impl Provider for NammaYatri {
    fn id(&self) -> ProviderKind {
        ProviderKind::NammaYatri
    }

    fn name(&self) -> &'static str {
        "Namma Yatri"
    }

    fn package(&self) -> &'static str {
        "in.juspay.nammayatri"
    }

    fn covers(&self, pickup: Coordinate, drop: Coordinate) -> bool {
        let area = BoundingBox::around(BLR_CENTER, BLR_HALF_DEG);
        area.contains(pickup) || area.contains(drop)
    }

    fn launch(&self, _pickup: Coordinate, _drop: Coordinate) -> LaunchMode {
        LaunchMode::CopyAddressAndOpen
    }
}
