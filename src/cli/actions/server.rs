use crate::sesame::{
    self,
    session::Sessions,
    store::PgStore,
    tokens::JwtIssuer,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{fmt, sync::Arc};
use tracing::{debug, info};
use url::Url;

pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &redact_dsn(&self.dsn))
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Strip credentials from a DSN so it can be logged.
fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("REDACTED"));
            }
            url.to_string()
        }
        Err(_) => "[unparseable dsn]".to_string(),
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the schema cannot be
/// applied, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("server args: {args:?}");

    info!("Connecting to database: {}", redact_dsn(&args.dsn));

    let store = PgStore::connect(&args.dsn)
        .await
        .context("Failed to connect to database")?;

    store
        .ensure_schema()
        .await
        .context("Failed to apply database schema")?;

    let issuer = JwtIssuer::new(args.jwt_secret)
        .with_access_ttl_seconds(args.access_token_ttl_seconds)
        .with_refresh_ttl_seconds(args.refresh_token_ttl_seconds);

    let sessions =
        Sessions::new(Arc::new(store), Arc::new(issuer)).with_bcrypt_cost(args.bcrypt_cost);

    sesame::new(args.port, sessions).await
}
