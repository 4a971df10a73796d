pub mod password;
pub mod session;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Session, User, UserProfile};
use crate::storage::KvStore;

// Re-export necessary items
pub use password::{hash_password, verify_password};
pub use session::SessionRepo;
pub use users::UserStore;

lazy_static! {
    // Email shape accepted by the app: local@domain.tld, no whitespace,
    // with a dot somewhere after the @.
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(regex(
        path = "EMAIL_REGEX",
        message = "Please enter a valid email address"
    ))]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Represents the payload for a new account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    /// Must be at least 2 characters long.
    #[validate(length(
        min = 2,
        max = 100,
        message = "Please enter your full name (minimum 2 characters)"
    ))]
    pub name: String,
    /// Email address for the new account.
    #[validate(regex(
        path = "EMAIL_REGEX",
        message = "Please enter a valid email address"
    ))]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Repeated password; must match `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Represents the payload for a password-recovery request.
#[derive(Debug, Deserialize, Validate)]
pub struct RecoveryRequest {
    #[validate(regex(
        path = "EMAIL_REGEX",
        message = "Please enter a valid email address"
    ))]
    pub email: String,
}

/// Authentication service: gates entry to the task board.
///
/// This is a UX gate over a local store, not a security boundary; see the
/// design notes. The user-facing flows sleep for a configurable latency
/// before completing, standing in for the network round-trip a real backend
/// would cost.
pub struct AuthService {
    users: UserStore,
    sessions: SessionRepo,
    session_ttl_days: i64,
    latency: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn KvStore>, session_ttl_days: i64, latency: Duration) -> Self {
        Self {
            users: UserStore::new(store.clone()),
            sessions: SessionRepo::new(store),
            session_ttl_days,
            latency,
        }
    }

    /// Register a new account.
    ///
    /// Validates the input, rejects an already-registered email, then stores
    /// the user with a hashed password. Registration does not log the user
    /// in; a separate [`login`](Self::login) is required.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AppError> {
        let request = RegisterRequest {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password.clone(),
            confirm_password: request.confirm_password.clone(),
        };
        request.validate()?;

        if self.users.find_by_email(&request.email)?.is_some() {
            return Err(AppError::Validation(
                "An account with this email already exists".into(),
            ));
        }

        self.simulate_network().await;

        let user = User::new(
            request.name,
            request.email,
            hash_password(&request.password)?,
        );
        let profile = user.profile();
        self.users.insert(user)?;
        log::info!("registered account for {}", profile.email);

        Ok(profile)
    }

    /// Log in and overwrite the active session.
    ///
    /// Fails with a generic message on any credential mismatch, without
    /// distinguishing an unknown email from a wrong password.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AppError> {
        let request = LoginRequest {
            email: request.email.trim().to_string(),
            password: request.password.clone(),
        };
        request.validate()?;

        self.simulate_network().await;

        if let Some(user) = self.users.find_by_email(&request.email)? {
            if verify_password(&request.password, &user.password_hash)? {
                let session = Session::new(user.profile(), self.session_ttl_days);
                self.sessions.set(&session)?;
                log::info!("session opened for {}", session.user.email);
                return Ok(session);
            }
        }

        Err(AppError::Auth("Invalid email or password".into()))
    }

    /// Request a password reset.
    ///
    /// Reports the same success line whether or not the address is
    /// registered, so the operation cannot be used to enumerate accounts.
    /// No mail is actually sent.
    pub async fn request_password_recovery(
        &self,
        request: &RecoveryRequest,
    ) -> Result<String, AppError> {
        let request = RecoveryRequest {
            email: request.email.trim().to_string(),
        };
        request.validate()?;

        self.simulate_network().await;

        Ok(
            "If an account exists for this email, you will receive reset instructions."
                .to_string(),
        )
    }

    /// Returns the logged-in user, if the stored session is still valid.
    /// Pure read: an expired record is ignored, not cleaned up.
    pub fn current_user(&self) -> Result<Option<UserProfile>, AppError> {
        Ok(self
            .sessions
            .get()?
            .filter(Session::is_valid)
            .map(|session| session.user))
    }

    /// Clears the active session unconditionally.
    pub fn logout(&self) -> Result<(), AppError> {
        log::info!("session cleared");
        self.sessions.clear()
    }

    async fn simulate_network(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
