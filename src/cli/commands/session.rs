use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::sesame::{
    password::DEFAULT_BCRYPT_COST,
    tokens::{DEFAULT_ACCESS_TOKEN_TTL_SECONDS, DEFAULT_REFRESH_TOKEN_TTL_SECONDS},
};

pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_ACCESS_TOKEN_TTL: &str = "access-token-ttl";
pub const ARG_REFRESH_TOKEN_TTL: &str = "refresh-token-ttl";
pub const ARG_BCRYPT_COST: &str = "bcrypt-cost";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long(ARG_JWT_SECRET)
                .help("Secret used to sign access tokens (HS256)")
                .env("SESAME_JWT_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_ACCESS_TOKEN_TTL)
                .long(ARG_ACCESS_TOKEN_TTL)
                .help("Access token TTL in seconds")
                .env("SESAME_ACCESS_TOKEN_TTL")
                .default_value("900")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_REFRESH_TOKEN_TTL)
                .long(ARG_REFRESH_TOKEN_TTL)
                .help("Refresh token TTL in seconds")
                .env("SESAME_REFRESH_TOKEN_TTL")
                .default_value("2592000")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_BCRYPT_COST)
                .long(ARG_BCRYPT_COST)
                .help("bcrypt work factor for new password hashes")
                .env("SESAME_BCRYPT_COST")
                .default_value("8")
                .value_parser(clap::value_parser!(u32).range(4..=31)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub jwt_secret: SecretString,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub bcrypt_cost: u32,
}

impl Options {
    /// # Errors
    /// Returns an error if the JWT secret is missing or empty.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let jwt_secret = matches
            .get_one::<String>(ARG_JWT_SECRET)
            .filter(|secret| !secret.trim().is_empty())
            .cloned()
            .context("missing required argument: --jwt-secret")?;

        Ok(Self {
            jwt_secret: SecretString::from(jwt_secret),
            access_token_ttl_seconds: matches
                .get_one::<u64>(ARG_ACCESS_TOKEN_TTL)
                .copied()
                .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            refresh_token_ttl_seconds: matches
                .get_one::<u64>(ARG_REFRESH_TOKEN_TTL)
                .copied()
                .unwrap_or(DEFAULT_REFRESH_TOKEN_TTL_SECONDS),
            bcrypt_cost: matches
                .get_one::<u32>(ARG_BCRYPT_COST)
                .copied()
                .unwrap_or(DEFAULT_BCRYPT_COST),
        })
    }
}
