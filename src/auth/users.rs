use std::sync::Arc;

use crate::error::AppError;
use crate::models::User;
use crate::storage::{KvStore, USERS_KEY};

/// Repository over the registered-user collection.
pub struct UserStore {
    store: Arc<dyn KvStore>,
}

impl UserStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<User>, AppError> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Case-sensitive exact match, like the application this store serves.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.all()?.into_iter().find(|user| user.email == email))
    }

    pub fn insert(&self, user: User) -> Result<(), AppError> {
        let mut users = self.all()?;
        users.push(user);
        self.store.set(USERS_KEY, &serde_json::to_string(&users)?)
    }
}
