//! Session flows: register, login and refresh-token rotation.
//!
//! `Sessions` holds no per-request state; every call reads and writes the
//! credential store directly. None of the multi-step flows are atomic: two
//! concurrent logins for one user can both delete and then both insert,
//! leaving two live refresh tokens.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::password::{hash_password, verify_password, DEFAULT_BCRYPT_COST};
use super::store::{CredentialStore, InsertUserOutcome, NewUser, RefreshToken, User};
use super::tokens::{unix_now, TokenIssuer};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Email already registered.")]
    DuplicateEmail,
    #[error("Email not registered.")]
    EmailNotFound,
    #[error("Incorrect password.")]
    WrongPassword,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Credentials produced by a successful flow.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Renewed(Session),
    /// Cookie missing, not a token id, or no such token (or owner).
    Unknown,
    /// The presented token had expired. Rotation already happened, so
    /// `rotated` is persisted but must not be handed to the client.
    Expired { rotated: RefreshToken },
}

#[derive(Clone)]
pub struct Sessions {
    store: Arc<dyn CredentialStore>,
    issuer: Arc<dyn TokenIssuer>,
    bcrypt_cost: u32,
}

impl Sessions {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store,
            issuer,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create a user and open its first session.
    ///
    /// # Errors
    /// `DuplicateEmail` when the email is taken, `Internal` on store, hashing
    /// or signing failures.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        // Pre-check only; the unique constraint catches a racing insert below.
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(SessionError::DuplicateEmail);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let user = match self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?
        {
            InsertUserOutcome::Created(user) => user,
            InsertUserOutcome::Conflict => return Err(SessionError::DuplicateEmail),
        };

        self.issue(user).await
    }

    /// Check credentials, drop every refresh token of the user and issue new ones.
    ///
    /// # Errors
    /// `EmailNotFound`, `WrongPassword`, or `Internal` on infrastructure failures.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let Some(user) = self.store.find_user_by_email(email).await? else {
            return Err(SessionError::EmailNotFound);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(SessionError::WrongPassword);
        }

        let removed = self.store.delete_refresh_tokens(user.id).await?;
        debug!("removed {} refresh token(s) for {}", removed, user.id);

        self.issue(user).await
    }

    /// Exchange a refresh-token id for a new session.
    ///
    /// The token is rotated before its expiry is looked at, so an expired
    /// token still replaces every token of its owner with a new one.
    ///
    /// # Errors
    /// `Internal` on store or signing failures.
    #[instrument(skip(self, refresh_id))]
    pub async fn authenticate_by_refresh(
        &self,
        refresh_id: Option<&str>,
    ) -> Result<RefreshOutcome, SessionError> {
        let Some(id) = refresh_id.and_then(|id| Uuid::parse_str(id.trim()).ok()) else {
            return Ok(RefreshOutcome::Unknown);
        };

        let Some(presented) = self.store.find_refresh_token(id).await? else {
            return Ok(RefreshOutcome::Unknown);
        };

        let Some(user) = self.store.find_user_by_id(presented.user_id).await? else {
            return Ok(RefreshOutcome::Unknown);
        };

        self.store.delete_refresh_tokens(presented.user_id).await?;
        let session = self.issue(user).await?;

        if is_expired(&presented, unix_now()) {
            debug!("refresh token {} expired at {}", presented.id, presented.expires_in);
            return Ok(RefreshOutcome::Expired {
                rotated: session.refresh_token,
            });
        }

        Ok(RefreshOutcome::Renewed(session))
    }

    async fn issue(&self, user: User) -> Result<Session, SessionError> {
        let access_token = self.issuer.access_token(user.id)?;
        let refresh_token = self
            .store
            .insert_refresh_token(user.id, self.issuer.refresh_expires_in())
            .await?;

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }
}

/// A token expires once the clock is strictly past `expires_in`.
fn is_expired(token: &RefreshToken, now: u64) -> bool {
    i64::try_from(now).map_or(true, |now| now > token.expires_in)
}
