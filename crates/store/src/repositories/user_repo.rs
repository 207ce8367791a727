//! User accounts repository.

use async_trait::async_trait;
use pancheck_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::user::{CreateUser, User};
use crate::StoreError;

/// Lookup and creation of user accounts.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Find a user by email (exact, case-sensitive).
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Find a user by id.
    async fn find_by_id(&self, id: DbId) -> Option<User>;

    /// Insert a new user, returning the created record.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken. The
    /// check and the insert are atomic.
    async fn create(&self, input: CreateUser) -> Result<User, StoreError>;

    /// Number of stored accounts.
    async fn count(&self) -> usize;
}

/// Process-local user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn find_by_id(&self, id: DbId) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn create(&self, input: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::DuplicateEmail(input.email));
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
        };
        users.push(user.clone());

        tracing::debug!(user_id = id, "User created");
        Ok(user)
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
