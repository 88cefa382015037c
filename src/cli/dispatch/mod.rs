//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary should execute.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let accounts_path = matches
        .get_one::<String>("accounts-path")
        .cloned()
        .context("missing required argument: --accounts-path")?;

    let frontend_origin = matches.get_one::<String>("frontend-origin").cloned();

    Ok(Action::Server(Args {
        port,
        accounts_path,
        frontend_origin,
    }))
}
