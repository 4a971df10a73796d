use std::sync::Arc;

use crate::error::AppError;
use crate::models::Session;
use crate::storage::{KvStore, SESSION_KEY};

/// Repository over the single active session record.
///
/// A plain get/set/clear interface injected where needed, instead of a
/// static-method namespace reaching into global state.
pub struct SessionRepo {
    store: Arc<dyn KvStore>,
}

impl SessionRepo {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Reads the stored session, if any. A record that no longer parses is
    /// treated as logged out rather than surfaced as an error.
    pub fn get(&self) -> Result<Option<Session>, AppError> {
        let raw = self.store.get(SESSION_KEY)?;
        Ok(raw.and_then(|raw| serde_json::from_str(&raw).ok()))
    }

    pub fn set(&self, session: &Session) -> Result<(), AppError> {
        self.store.set(SESSION_KEY, &serde_json::to_string(session)?)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(SESSION_KEY)
    }
}
