use crate::domain::value_objects::UserId;
use crate::ports::user_service::{Result, UserService as UserServiceTrait, UserSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Mock implementation of UserService
///
/// Keeps registered users in memory. Reads take a shared lock,
/// so concurrent requests can look users up in parallel.
pub struct UserService {
    users: RwLock<HashMap<UserId, UserSummary>>,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Register a user for testing purposes
    pub fn add_user(&self, user: UserSummary) {
        self.users.write().unwrap().insert(user.user_id, user);
    }

    /// Register a user with generated name and email, returning its id
    pub fn add_named_user(&self, name: &str) -> UserId {
        let user_id = UserId::new();
        self.add_user(UserSummary {
            user_id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        });
        user_id
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserSummary>> {
        Ok(self.users.read().unwrap().get(&user_id).cloned())
    }
}
