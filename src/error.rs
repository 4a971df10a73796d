//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the conditions that can occur, from storage faults to validation
//! failures.
//!
//! `From` trait implementations for common error types like
//! `validator::ValidationErrors`, `serde_json::Error`, `std::io::Error`, and
//! `bcrypt::BcryptError` allow easy conversion with the `?` operator.

use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// No variant is fatal: every failure path returns control to the caller with
/// a message and leaves prior state unchanged.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input. Carries a field-specific message so the
    /// user can correct the form and resubmit.
    Validation(String),
    /// Credential mismatch. The message is intentionally generic and does not
    /// reveal whether the email or the password was wrong.
    Auth(String),
    /// An operation referenced a task or list id that does not exist.
    /// Most call sites swallow this case silently instead of surfacing it.
    NotFound(String),
    /// A persistence fault: file I/O or (de)serialization of a stored record.
    Storage(String),
    /// An unexpected internal fault, e.g. a password-hashing failure.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Auth(msg) => write!(f, "Authentication Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed per-field messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `serde_json::Error` into `AppError::Storage`.
///
/// Every persisted record is JSON, so a (de)serialization failure is a
/// storage-level fault.
impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}

/// Converts `std::io::Error` into `AppError::Storage`.
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
