use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{session, ARG_DSN, ARG_PORT};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        jwt_secret: session_opts.jwt_secret,
        access_token_ttl_seconds: session_opts.access_token_ttl_seconds,
        refresh_token_ttl_seconds: session_opts.refresh_token_ttl_seconds,
        bcrypt_cost: session_opts.bcrypt_cost,
    }))
}
