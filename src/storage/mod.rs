//!
//! # Local Key-Value Storage
//!
//! All application state lives in a flat string key-value store, mirroring the
//! browser localStorage contract the application was designed around. The
//! [`KvStore`] trait is the seam the services are written against; the binary
//! uses the JSON-file-backed [`FileStore`] and tests use [`MemoryStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppError;

/// Key holding the serialized credential collection (array of `User`).
pub const USERS_KEY: &str = "dailytasks_users";

/// Key holding the single active session record; absent when logged out.
pub const SESSION_KEY: &str = "dailytasks_session";

/// Key holding a user's board (mapping of list id to list record).
pub fn board_key(user_id: &str) -> String {
    format!("dailytasks_board_{}", user_id)
}

/// Key holding a user's progress snapshot. Write-only cache: nothing in the
/// application reads it back.
pub fn progress_key(user_id: &str) -> String {
    format!("dailytasks_progress_{}", user_id)
}

/// A flat string-to-string store with the localStorage read/write contract.
///
/// Implementations provide their own interior mutability; callers hold the
/// store behind an `Arc` and never need `&mut` access.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}
