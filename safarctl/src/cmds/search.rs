//! This is the module handling the `search` sub-command.
//!

use std::time::Duration;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use safar_common::Place;
use safar_geocode::SearchDebouncer;

use crate::{Config, SearchOpts};

/// One-shot place search, through the same sequencer the interactive path
/// uses, just without an inactivity window.
///
#[tracing::instrument(skip(cfg))]
pub async fn search_place(cfg: &Config, opts: &SearchOpts) -> Result<String> {
    trace!("search_place({:?})", opts.query);

    let mut deb = SearchDebouncer::with_delay(cfg.geocoder(), Duration::ZERO);
    deb.on_query_changed(&opts.query);
    let found = deb.settle().await;

    Ok(format_places(&found))
}

/// Suggestions into a nicely formatted string.
///
pub fn format_places(places: &[Place]) -> String {
    let header = vec!["Address", "Lat", "Lon"];

    let mut builder = Builder::default();
    builder.push_record(header);

    places.iter().for_each(|p| {
        let lat = p.coord.lat.to_string();
        let lon = p.coord.lon.to_string();
        builder.push_record(vec![p.address.as_str(), &lat, &lon]);
    });

    let table = builder.build().with(Style::rounded()).to_string();
    format!("Found {} place(s):\n{table}", places.len())
}
