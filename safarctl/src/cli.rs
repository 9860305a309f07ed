//! Module describing all possible commands and sub-commands to the
//! `safarctl` main driver
//!
//! We have four main commands:
//!
//! - `search` runs one geocoding query and prints the suggestions
//! - `plan` geocodes both endpoints and prints the provider directives,
//!   optionally resolving one into a hand-off
//! - `login`/`signup`/`logout`/`whoami` drive the identity provider session
//! - `list` enumerates what we know about
//!
//! `completion` is here just to configure the various shells completion
//! system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, ValueEnum};
use clap_complete::shells::Shell;

use safar_providers::ProviderKind;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode (hierarchical traces).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `search QUERY`
/// `plan (--from QUERY | --at LAT,LON) --to QUERY [--book PROVIDER] [--launch]`
/// `login|signup|logout|whoami`
/// `list providers`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Search for a place by free-text query
    Search(SearchOpts),
    /// Build the provider list for a trip
    Plan(PlanOpts),
    /// Sign in against the identity provider
    Login(LoginOpts),
    /// Create an account
    Signup(SignupOpts),
    /// Drop the cached session
    Logout,
    /// Show the current session
    Whoami,
    /// List what we know about
    List(ListOpts),
}

// ------

/// Options for the one-shot place search.
///
#[derive(Debug, Parser)]
pub struct SearchOpts {
    /// Free-text query, shorter than 3 characters returns nothing.
    pub query: String,
}

// ------

/// Options for planning a trip and optionally handing off.
///
#[derive(Debug, Parser)]
pub struct PlanOpts {
    /// Pickup as a free-text query (first match wins).
    #[clap(long, conflicts_with = "at")]
    pub from: Option<String>,
    /// Pickup as a raw "LAT,LON" fix, reverse geocoded for display.
    #[clap(long)]
    pub at: Option<String>,
    /// Drop as a free-text query (first match wins).
    #[clap(long)]
    pub to: String,
    /// Resolve this provider's directive into a hand-off plan.
    #[clap(long)]
    pub book: Option<ProviderKind>,
    /// Actually ask the OS to open the hand-off target.
    #[clap(long, requires = "book")]
    pub launch: bool,
}

// ------

/// Email/password and federated login.
///
#[derive(Debug, Parser)]
pub struct LoginOpts {
    /// Email as username.
    #[clap(short = 'u', long, required_unless_present = "google")]
    pub email: Option<String>,
    /// Password.
    #[clap(short = 'p', long, required_unless_present = "google")]
    pub password: Option<String>,
    /// Federated sign-in with an external id token (login-only mode).
    #[clap(long, conflicts_with_all = ["email", "password"])]
    pub google: Option<String>,
}

#[derive(Debug, Parser)]
pub struct SignupOpts {
    /// Display name.
    #[clap(short = 'n', long)]
    pub name: String,
    /// Email as username.
    #[clap(short = 'u', long)]
    pub email: String,
    /// Password.
    #[clap(short = 'p', long)]
    pub password: String,
    /// Password, again.
    #[clap(long)]
    pub confirm: String,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list providers`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all built-in ride-hailing providers
    Providers,
}
