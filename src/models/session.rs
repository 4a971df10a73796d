use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

/// The single active session record.
///
/// Exactly one session exists at a time; each login overwrites it. Validity
/// is computed on read (`now < expires_at`), so an expired record needs no
/// active cleanup — it simply stops being honored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: UserProfile, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            user,
            issued_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
