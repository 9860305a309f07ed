use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use safar_common::init_logging;
use safarctl::{
    list_providers, login, logout, plan_trip, search_place, signup, whoami, Config,
    ListSubCommand, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();
    let cfn = opts.config.clone();

    // Initialise logging.
    //
    init_logging(opts.debug)?;

    // Config has the identity credentials and the geocoder endpoint, all of
    // it optional.
    //
    let cfn = cfn.as_ref().map(|p| p.to_string_lossy().to_string());
    let cfg = Config::load(cfn.as_deref())?;

    // Banner
    //
    banner()?;

    handle_subcmd(&cfg, &opts.subcmd).await
}

async fn handle_subcmd(cfg: &Config, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `search QUERY`
        //
        SubCommand::Search(sopts) => {
            trace!("search");

            let str = search_place(cfg, sopts).await?;
            eprintln!("{}", str);
        }

        // Handle `plan --from/--at --to`
        //
        SubCommand::Plan(popts) => {
            trace!("plan");

            plan_trip(cfg, popts).await?;
        }

        // Identity commands
        //
        SubCommand::Login(lopts) => {
            trace!("login");

            login(cfg, lopts).await?;
        }
        SubCommand::Signup(sopts) => {
            trace!("signup");

            signup(cfg, sopts).await?;
        }
        SubCommand::Logout => {
            trace!("logout");

            logout();
        }
        SubCommand::Whoami => {
            trace!("whoami");

            whoami(cfg).await?;
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => match lopts.cmd {
            ListSubCommand::Providers => {
                info!("Listing all providers:");

                let str = list_providers()?;
                eprintln!("{}", str);
            }
        },
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
