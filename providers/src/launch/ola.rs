//! Ola specifics
//!
//! Direct deep link carrying both endpoints as raw coordinates.
//!

use safar_common::Coordinate;

use crate::launch::coord;
use crate::{LaunchMode, Provider, ProviderKind};

#[derive(Clone, Copy, Debug)]
pub struct Ola;

impl Provider for Ola {
    fn id(&self) -> ProviderKind {
        ProviderKind::Ola
    }

    fn name(&self) -> &'static str {
        "Ola Cabs"
    }

    fn package(&self) -> &'static str {
        "com.olacabs.customer"
    }

    fn launch(&self, pickup: Coordinate, drop: Coordinate) -> LaunchMode {
        LaunchMode::DeepLink(format!(
            "olacabs://app/launch?lat={}&lng={}&drop_lat={}&drop_lng={}&category=share",
            coord(pickup.lat),
            coord(pickup.lon),
            coord(drop.lat),
            coord(drop.lon)
        ))
    }
}
