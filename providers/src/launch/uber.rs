//! Uber specifics
//!
//! Direct deep link using the documented `setPickup` action.
//!

use safar_common::Coordinate;

use crate::launch::coord;
use crate::{LaunchMode, Provider, ProviderKind};

#[derive(Clone, Copy, Debug)]
pub struct Uber;

impl Provider for Uber {
    fn id(&self) -> ProviderKind {
        ProviderKind::Uber
    }

    fn name(&self) -> &'static str {
        "Uber"
    }

    fn package(&self) -> &'static str {
        "com.ubercab"
    }

    fn launch(&self, pickup: Coordinate, drop: Coordinate) -> LaunchMode {
        LaunchMode::DeepLink(format!(
            "uber://?action=setPickup&pickup[latitude]={}&pickup[longitude]={}&dropoff[latitude]={}&dropoff[longitude]={}",
            coord(pickup.lat),
            coord(pickup.lon),
            coord(drop.lat),
            coord(drop.lon)
        ))
    }
}
