//!
//! # Application Controller
//!
//! Explicit application state owned by a single controller: constructed at
//! startup, mutated only through the auth/task service operations, and torn
//! down on logout. The command handlers here are callable independent of any
//! UI, which is also how the integration tests drive them.

use std::sync::Arc;

use crate::auth::{AuthService, LoginRequest, RecoveryRequest, RegisterRequest};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{Session, UserProfile};
use crate::storage::KvStore;
use crate::tasks::TaskService;

pub struct App {
    store: Arc<dyn KvStore>,
    auth: AuthService,
    tasks: Option<TaskService>,
}

impl App {
    pub fn new(store: Arc<dyn KvStore>, config: &Config) -> Self {
        let auth = AuthService::new(
            store.clone(),
            config.session_ttl_days,
            config.simulated_latency(),
        );
        Self {
            store,
            auth,
            tasks: None,
        }
    }

    /// Resumes a previously saved session, if a valid one exists, and opens
    /// the task board for its user.
    pub fn resume(&mut self) -> Result<Option<UserProfile>, AppError> {
        match self.auth.current_user()? {
            Some(profile) => {
                self.tasks = Some(TaskService::open(self.store.clone(), profile.clone())?);
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    pub async fn on_register(&self, request: &RegisterRequest) -> Result<UserProfile, AppError> {
        self.auth.register(request).await
    }

    /// Logs in and opens the task board for the session's user.
    pub async fn on_login(&mut self, request: &LoginRequest) -> Result<Session, AppError> {
        let session = self.auth.login(request).await?;
        self.tasks = Some(TaskService::open(self.store.clone(), session.user.clone())?);
        Ok(session)
    }

    pub async fn on_recover(&self, request: &RecoveryRequest) -> Result<String, AppError> {
        self.auth.request_password_recovery(request).await
    }

    /// Clears the session and tears down the task board.
    pub fn on_logout(&mut self) -> Result<(), AppError> {
        self.tasks = None;
        self.auth.logout()
    }

    pub fn is_logged_in(&self) -> bool {
        self.tasks.is_some()
    }

    /// The task service for the logged-in user.
    pub fn tasks(&mut self) -> Result<&mut TaskService, AppError> {
        self.tasks
            .as_mut()
            .ok_or_else(|| AppError::Auth("Not logged in".into()))
    }
}
