//! Credential store: users and refresh tokens.
//!
//! Every method is a straight passthrough to the backing store. There is no
//! caching, retrying or transaction around multi-step flows; callers see store
//! failures as `anyhow::Error`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Stored user, including the bcrypt hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields required to create a user; the store assigns the id.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Server-side refresh token. `expires_in` is seconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_in: i64,
}

/// Result of inserting a user.
#[derive(Debug)]
pub enum InsertUserOutcome {
    Created(User),
    /// The store rejected the email as already taken.
    Conflict,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> Result<InsertUserOutcome>;

    async fn find_refresh_token(&self, id: Uuid) -> Result<Option<RefreshToken>>;

    /// Delete every refresh token owned by `user_id`, returning how many went.
    async fn delete_refresh_tokens(&self, user_id: Uuid) -> Result<u64>;

    async fn insert_refresh_token(&self, user_id: Uuid, expires_in: i64) -> Result<RefreshToken>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<()>;
}
