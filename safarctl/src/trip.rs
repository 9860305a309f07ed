//! Trip state machine.
//!
//! Holds the two endpoints of a trip, runs the debounced suggestion search
//! for whichever field is being edited and, once both endpoints are set,
//! builds the provider directives.  All observable state goes through watch
//! channels so interactive front-ends can subscribe.
//!

use std::time::Duration;

use eyre::Result;
use tokio::sync::watch;
use tracing::trace;

use safar_common::{Coordinate, Place};
use safar_geocode::{Nominatim, SearchDebouncer};
use safar_providers::{build_directives, Directive};

use crate::Status;

/// The planner.  One per trip being put together.
///
#[derive(Debug)]
pub struct TripPlanner {
    geocoder: Nominatim,
    debouncer: SearchDebouncer,
    pickup_tx: watch::Sender<Option<Place>>,
    pickup_rx: watch::Receiver<Option<Place>>,
    drop_tx: watch::Sender<Option<Place>>,
    drop_rx: watch::Receiver<Option<Place>>,
    options_tx: watch::Sender<Vec<Directive>>,
    options_rx: watch::Receiver<Vec<Directive>>,
}

impl TripPlanner {
    pub fn new(geocoder: Nominatim) -> Self {
        Self::with_delay(geocoder, safar_geocode::DEBOUNCE)
    }

    /// Same but with a custom debounce window (tests).
    ///
    pub fn with_delay(geocoder: Nominatim, delay: Duration) -> Self {
        let (pickup_tx, pickup_rx) = watch::channel(None);
        let (drop_tx, drop_rx) = watch::channel(None);
        let (options_tx, options_rx) = watch::channel(Vec::new());
        TripPlanner {
            debouncer: SearchDebouncer::with_delay(geocoder.clone(), delay),
            geocoder,
            pickup_tx,
            pickup_rx,
            drop_tx,
            drop_rx,
            options_tx,
            options_rx,
        }
    }

    /// Subscribe to the pickup endpoint.
    ///
    pub fn pickup(&self) -> watch::Receiver<Option<Place>> {
        self.pickup_rx.clone()
    }

    /// Subscribe to the drop endpoint.
    ///
    pub fn drop_point(&self) -> watch::Receiver<Option<Place>> {
        self.drop_rx.clone()
    }

    /// Subscribe to the directive list.
    ///
    pub fn options(&self) -> watch::Receiver<Vec<Directive>> {
        self.options_rx.clone()
    }

    /// Take a raw coordinate fix as the pickup (device location, `--at`).
    /// The address is reverse geocoded, degrading to a raw "Lat/Lng" label.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn on_fix(&mut self, coord: Coordinate) -> Place {
        trace!("trip::on_fix");

        let address = self.geocoder.reverse(coord).await;
        let place = Place { coord, address };
        self.set_pickup(place.clone());
        place
    }

    /// Keystroke in a place search field.
    ///
    pub fn on_query_changed(&mut self, text: &str) {
        self.debouncer.on_query_changed(text);
    }

    /// Wait for the pending search and return the suggestions.
    ///
    pub async fn settle(&mut self) -> Vec<Place> {
        self.debouncer.settle().await
    }

    /// A suggestion was picked as pickup.  Clears the suggestion list.
    ///
    pub fn set_pickup(&mut self, place: Place) {
        self.debouncer.clear();
        let _ = self.pickup_tx.send(Some(place));
    }

    /// A suggestion was picked as drop.  Clears the suggestion list.
    ///
    pub fn set_drop(&mut self, place: Place) {
        self.debouncer.clear();
        let _ = self.drop_tx.send(Some(place));
    }

    /// Build the directives for the current endpoints.  Requires both to be
    /// set, the result is also published on the `options` channel.
    ///
    #[tracing::instrument(skip(self))]
    pub fn generate_fares(&mut self) -> Result<Vec<Directive>> {
        trace!("trip::generate_fares");

        let pickup = self
            .pickup_rx
            .borrow()
            .clone()
            .ok_or_else(|| Status::MissingEndpoint("pickup".to_owned()))?;
        let drop = self
            .drop_rx
            .borrow()
            .clone()
            .ok_or_else(|| Status::MissingEndpoint("drop".to_owned()))?;

        let opts = build_directives(pickup.coord, drop.coord);
        let _ = self.options_tx.send(opts.clone());
        Ok(opts)
    }
}
