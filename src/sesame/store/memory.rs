use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, InsertUserOutcome, NewUser, RefreshToken, User};

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<Uuid, RefreshToken>,
}

/// In-process store backed by two maps.
///
/// Mirrors the PostgreSQL constraints that matter to the session flows: user
/// emails are unique and compared byte-for-byte.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn refresh_token_count(&self) -> usize {
        self.inner.read().await.refresh_tokens.len()
    }

    /// Refresh tokens owned by `user_id`, in no particular order.
    pub async fn refresh_tokens_for(&self, user_id: Uuid) -> Vec<RefreshToken> {
        self.inner
            .read()
            .await
            .refresh_tokens
            .values()
            .filter(|token| token.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertUserOutcome> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Ok(InsertUserOutcome::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        inner.users.insert(user.id, user.clone());

        Ok(InsertUserOutcome::Created(user))
    }

    async fn find_refresh_token(&self, id: Uuid) -> Result<Option<RefreshToken>> {
        Ok(self.inner.read().await.refresh_tokens.get(&id).cloned())
    }

    async fn delete_refresh_tokens(&self, user_id: Uuid) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.refresh_tokens.len();
        inner
            .refresh_tokens
            .retain(|_, token| token.user_id != user_id);
        Ok((before - inner.refresh_tokens.len()) as u64)
    }

    async fn insert_refresh_token(&self, user_id: Uuid, expires_in: i64) -> Result<RefreshToken> {
        let token = RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            expires_in,
        };
        self.inner
            .write()
            .await
            .refresh_tokens
            .insert(token.id, token.clone());
        Ok(token)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_user_rejects_duplicate_email() -> Result<()> {
        let store = MemoryStore::new();
        assert!(matches!(
            store.insert_user(new_user("ana@x.com")).await?,
            InsertUserOutcome::Created(_)
        ));
        assert!(matches!(
            store.insert_user(new_user("ana@x.com")).await?,
            InsertUserOutcome::Conflict
        ));
        assert_eq!(store.user_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() -> Result<()> {
        let store = MemoryStore::new();
        store.insert_user(new_user("Ana@x.com")).await?;
        assert!(store.find_user_by_email("ana@x.com").await?.is_none());
        assert!(store.find_user_by_email("Ana@x.com").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn delete_refresh_tokens_only_touches_owner() -> Result<()> {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.insert_refresh_token(owner, 10).await?;
        store.insert_refresh_token(owner, 20).await?;
        let kept = store.insert_refresh_token(other, 30).await?;

        assert_eq!(store.delete_refresh_tokens(owner).await?, 2);
        assert!(store.refresh_tokens_for(owner).await.is_empty());
        assert_eq!(store.find_refresh_token(kept.id).await?, Some(kept));
        Ok(())
    }
}
