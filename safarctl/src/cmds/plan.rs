//! This is the module handling the `plan` sub-command.
//!
//! Geocode both endpoints, print the provider directives and, when asked,
//! resolve one of them into a hand-off plan and run it.
//!

use std::process::Command;
use std::time::Duration;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use safar_common::{Coordinate, Place};
use safar_providers::{resolve, Directive, LaunchError, LaunchMode, LaunchPlan, Target};

use crate::{Config, PlanOpts, Status, TripPlanner};

/// What the OS uses to open a URI.
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Actual trip planning.
///
#[tracing::instrument(skip(cfg))]
pub async fn plan_trip(cfg: &Config, popts: &PlanOpts) -> Result<()> {
    trace!("plan_trip");

    // One-shot callers need no inactivity window.
    //
    let mut trip = TripPlanner::with_delay(cfg.geocoder(), Duration::ZERO);

    // Pickup, either a raw fix or the first match of a query.
    //
    let pickup = match (&popts.at, &popts.from) {
        (Some(fix), _) => trip.on_fix(parse_fix(fix)?).await,
        (None, Some(query)) => {
            let place = first_match(&mut trip, query).await?;
            trip.set_pickup(place.clone());
            place
        }
        (None, None) => return Err(Status::MissingEndpoint("pickup".to_owned()).into()),
    };
    info!("Pickup is {}", pickup.address);

    let drop = first_match(&mut trip, &popts.to).await?;
    info!("Drop is {}", drop.address);
    trip.set_drop(drop.clone());

    let opts = trip.generate_fares()?;
    eprintln!("{}", format_directives(&opts));

    // Resolve one directive into a hand-off when asked.
    //
    if let Some(kind) = popts.book {
        let directive = opts
            .iter()
            .find(|o| o.id == kind)
            .ok_or_else(|| Status::NotServed(kind.to_string()))?;
        let plan = resolve(directive, Some(&drop.address));

        eprintln!("{}", format_plan(&plan));
        if popts.launch {
            // A failed hand-off is reported, never propagated.
            //
            if let Err(e) = execute(&plan, &directive.provider) {
                eprintln!("{e}");
            }
        }
    }
    Ok(())
}

/// Parse a raw "LAT,LON" fix.
///
pub fn parse_fix(str: &str) -> Result<Coordinate> {
    let bad = || Status::BadFix(str.to_owned());

    let (lat, lon) = str.split_once(',').ok_or_else(bad)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| bad())?;
    let lon = lon.trim().parse::<f64>().map_err(|_| bad())?;
    Ok(Coordinate { lat, lon })
}

/// First suggestion for a query, error when nothing matches.
///
async fn first_match(trip: &mut TripPlanner, query: &str) -> Result<Place> {
    trip.on_query_changed(query);
    let found = trip.settle().await;
    found
        .first()
        .cloned()
        .ok_or_else(|| Status::NoSuchPlace(query.to_owned()).into())
}

/// Directive list into a nicely formatted string.
///
pub fn format_directives(opts: &[Directive]) -> String {
    let header = vec!["Provider", "Id", "Package", "Hand-off"];

    let mut builder = Builder::default();
    builder.push_record(header);

    opts.iter().for_each(|o| {
        let id = o.id.to_string();
        let mode = match &o.mode {
            LaunchMode::DeepLink(uri) => uri.clone(),
            LaunchMode::CopyAddressAndOpen => "copy address, then open app".to_owned(),
        };
        builder.push_record(vec![o.provider.as_str(), &id, &o.package, &mode]);
    });

    let table = builder.build().with(Style::rounded()).to_string();
    format!("Found {} option(s):\n{table}", opts.len())
}

/// Hand-off plan into a short description.
///
pub fn format_plan(plan: &LaunchPlan) -> String {
    let mut out = vec![];
    if let Some(text) = &plan.clipboard {
        out.push(format!("Copy to clipboard: {text}"));
    }
    out.push(format!("Open: {}", target(&plan.primary)));
    out.push(format!("Fallback: {}", target(&plan.fallback)));
    out.join("\n")
}

fn target(t: &Target) -> String {
    match t {
        Target::Uri(uri) => uri.clone(),
        Target::Package(pkg) => format!("app {pkg}"),
    }
}

/// Ask the OS to run the plan.  A package target can not be opened directly
/// from here so it goes straight to the store listing.
///
fn execute(plan: &LaunchPlan, provider: &str) -> Result<(), LaunchError> {
    if let Target::Uri(uri) = &plan.primary {
        if open(uri) {
            return Ok(());
        }
    }
    let not_installed = || LaunchError::AppNotInstalled(provider.to_owned());

    let Target::Uri(fallback) = &plan.fallback else {
        return Err(not_installed());
    };
    if open(fallback) {
        Ok(())
    } else {
        Err(not_installed())
    }
}

fn open(uri: &str) -> bool {
    trace!("open {uri}");

    Command::new(OPENER)
        .arg(uri)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
