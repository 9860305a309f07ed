//! Module to deal with the different ride-hailing providers we can hand off
//! to.
//!
//! The different submodules deal with the differences between providers:
//!
//! - how the native app is launched (deep-link URI or copy-address-and-open)
//! - whether the provider serves the trip at all (service area)
//!
//! All intelligence (pricing, ETA, routing) lives in the provider apps, this
//! crate only builds launch directives from two coordinates.
//!

use std::fmt::Debug;

use safar_common::Coordinate;

pub use directive::*;
pub use error::*;
pub use handoff::*;
pub use launch::*;

mod directive;
mod error;
mod handoff;
mod launch;

/// This trait enables us to manage the different ways of handing off to a
/// provider under a single interface.
///
pub trait Provider: Debug {
    /// Stable identifier, what `--book` takes.
    fn id(&self) -> ProviderKind;
    /// User-facing name.
    fn name(&self) -> &'static str;
    /// OS package identifier of the native app.
    fn package(&self) -> &'static str;
    /// Whether the provider serves this trip at all.
    fn covers(&self, _pickup: Coordinate, _drop: Coordinate) -> bool {
        true
    }
    /// How to launch the app for this trip.
    fn launch(&self, pickup: Coordinate, drop: Coordinate) -> LaunchMode;

    /// Assemble the full directive.
    ///
    fn directive(&self, pickup: Coordinate, drop: Coordinate) -> Directive {
        Directive {
            id: self.id(),
            provider: self.name().to_owned(),
            package: self.package().to_owned(),
            mode: self.launch(pickup, drop),
            // Providers do their own pricing, these stay placeholders.
            price: None,
            eta: String::new(),
        }
    }
}

/// Build the ordered list of launch directives for a trip.
///
/// Pure and deterministic: fixed provider order, the only conditional being
/// each provider's own service-area check.
///
#[tracing::instrument]
pub fn build_directives(pickup: Coordinate, drop: Coordinate) -> Vec<Directive> {
    builtin()
        .iter()
        .filter(|p| p.covers(pickup, drop))
        .map(|p| p.directive(pickup, drop))
        .collect()
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const BLR: Coordinate = Coordinate {
        lat: 12.9716,
        lon: 77.5946,
    };
    const BLR_NEARBY: Coordinate = Coordinate {
        lat: 13.0,
        lon: 77.6,
    };
    const DELHI_A: Coordinate = Coordinate {
        lat: 28.6,
        lon: 77.2,
    };
    const DELHI_B: Coordinate = Coordinate {
        lat: 28.7,
        lon: 77.3,
    };

    #[test]
    fn test_three_directives_outside_service_area() {
        let opts = build_directives(DELHI_A, DELHI_B);
        assert_eq!(3, opts.len());
        let ids: Vec<ProviderKind> = opts.iter().map(|o| o.id).collect();
        assert_eq!(
            vec![ProviderKind::Rapido, ProviderKind::Ola, ProviderKind::Uber],
            ids
        );
    }

    #[rstest]
    #[case(BLR, BLR_NEARBY)]
    #[case(DELHI_A, BLR)]
    #[case(BLR_NEARBY, DELHI_B)]
    fn test_four_directives_near_blr(#[case] pickup: Coordinate, #[case] drop: Coordinate) {
        let opts = build_directives(pickup, drop);
        assert_eq!(4, opts.len());
        assert_eq!(ProviderKind::NammaYatri, opts[3].id);
    }

    #[test]
    fn test_ola_uri_is_exact() {
        let opts = build_directives(BLR, BLR_NEARBY);
        let ola = &opts[1];
        assert_eq!(
            LaunchMode::DeepLink(
                "olacabs://app/launch?lat=12.9716&lng=77.5946&drop_lat=13.0&drop_lng=77.6&category=share".to_owned()
            ),
            ola.mode
        );
    }

    #[test]
    fn test_uber_uri_is_exact() {
        let opts = build_directives(BLR, BLR_NEARBY);
        let uber = &opts[2];
        assert_eq!(
            LaunchMode::DeepLink(
                "uber://?action=setPickup&pickup[latitude]=12.9716&pickup[longitude]=77.5946&dropoff[latitude]=13.0&dropoff[longitude]=77.6".to_owned()
            ),
            uber.mode
        );
    }

    #[test]
    fn test_copy_address_providers() {
        let opts = build_directives(BLR, BLR_NEARBY);
        assert_eq!(LaunchMode::CopyAddressAndOpen, opts[0].mode);
        assert_eq!(LaunchMode::CopyAddressAndOpen, opts[3].mode);
        assert_eq!("com.rapido.passenger", opts[0].package);
        assert_eq!("in.juspay.nammayatri", opts[3].package);
    }

    #[test]
    fn test_builder_is_idempotent() {
        assert_eq!(
            build_directives(BLR, BLR_NEARBY),
            build_directives(BLR, BLR_NEARBY)
        );
    }

    #[test]
    fn test_placeholders_stay_empty() {
        for opt in build_directives(DELHI_A, DELHI_B) {
            assert!(opt.price.is_none());
            assert!(opt.eta.is_empty());
        }
    }
}
