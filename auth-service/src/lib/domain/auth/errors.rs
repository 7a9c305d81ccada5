use thiserror::Error;

use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

/// Boxed cause carried by internal errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures reported by storage adapters.
///
/// The not-found and already-exists variants are the conditions the service
/// classifies; everything else is opaque.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for authentication operations.
///
/// Every variant carries the operation that produced it, so the rendered
/// message reads `auth.login: invalid credentials` while callers still match
/// on the variant.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are deliberately indistinguishable.
    #[error("{op}: invalid credentials")]
    InvalidCredentials { op: &'static str },

    #[error("{op}: user already exists")]
    UserAlreadyExists { op: &'static str },

    #[error("{op}: invalid app id: {app_id}")]
    InvalidAppId { op: &'static str, app_id: AppId },

    #[error("{op}: user not found: {user_id}")]
    UserNotFound { op: &'static str, user_id: UserId },

    #[error("{op}: operation cancelled")]
    Cancelled { op: &'static str },

    #[error("{op}: deadline exceeded")]
    DeadlineExceeded { op: &'static str },

    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AuthError {
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            op,
            source: source.into(),
        }
    }

    /// Operation that produced the error.
    pub fn op(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { op }
            | AuthError::UserAlreadyExists { op }
            | AuthError::InvalidAppId { op, .. }
            | AuthError::UserNotFound { op, .. }
            | AuthError::Cancelled { op }
            | AuthError::DeadlineExceeded { op }
            | AuthError::Internal { op, .. } => *op,
        }
    }
}
