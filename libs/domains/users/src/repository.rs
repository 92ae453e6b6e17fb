use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// Implementations can use different storage backends (PostgreSQL, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get the single user with this name.
    ///
    /// Returns `None` when no user or more than one user carries the name.
    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>>;

    /// Insert or update a user keyed by its id
    async fn save(&self, user: User) -> UserResult<User>;

    /// Insert a new user, letting the store assign the id
    async fn create(&self, input: NewUser) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let mut matches = users.values().filter(|u| u.name == name);

        let user = match (matches.next(), matches.next()) {
            (Some(user), None) => Some(user.clone()),
            _ => None,
        };

        Ok(user)
    }

    async fn save(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Saved user");
        Ok(user)
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let id = match users.keys().next_back() {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| UserError::Internal("User id space exhausted".to_string()))?,
            None => 1,
        };
        let user = User::new(id, input.name, input.passwd);
        users.insert(id, user.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(user)
    }
}
