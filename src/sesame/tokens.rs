//! Access-token signing and refresh-token lifetimes.

use anyhow::{Context, Result};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Issues the credentials handed to a client after a successful flow.
pub trait TokenIssuer: Send + Sync {
    /// Signed bearer token for `user_id`.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    fn access_token(&self, user_id: Uuid) -> Result<String>;

    /// Expiry, in seconds since the Unix epoch, for a refresh token created now.
    fn refresh_expires_in(&self) -> i64;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// HS256 JWT issuer.
#[derive(Clone)]
pub struct JwtIssuer {
    secret: SecretString,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl JwtIssuer {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            access_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_access_ttl_seconds(mut self, seconds: u64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_refresh_ttl_seconds(mut self, seconds: u64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("secret", &"***")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl TokenIssuer for JwtIssuer {
    fn access_token(&self, user_id: Uuid) -> Result<String> {
        let now = unix_now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.access_ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .context("failed to sign access token")
    }

    fn refresh_expires_in(&self) -> i64 {
        i64::try_from(unix_now().saturating_add(self.refresh_ttl_seconds)).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn issuer() -> JwtIssuer {
        JwtIssuer::new(SecretString::from("test-secret".to_string()))
            .with_access_ttl_seconds(60)
            .with_refresh_ttl_seconds(3600)
    }

    #[test]
    fn access_token_carries_subject_and_ttl() -> Result<()> {
        let user_id = Uuid::new_v4();
        let token = issuer().access_token(user_id)?;

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )?;
        assert_eq!(data.claims.sub, user_id.to_string());
        assert_eq!(data.claims.exp - data.claims.iat, 60);
        Ok(())
    }

    #[test]
    fn access_token_rejected_with_other_secret() -> Result<()> {
        let token = issuer().access_token(Uuid::new_v4())?;
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn refresh_expiry_is_in_the_future() {
        let now = i64::try_from(unix_now()).unwrap_or_default();
        let expires_in = issuer().refresh_expires_in();
        assert!(expires_in >= now + 3600);
        assert!(expires_in <= now + 3601);
    }

    #[test]
    fn debug_hides_secret() {
        let debug = format!("{:?}", issuer());
        assert!(!debug.contains("test-secret"));
    }
}
