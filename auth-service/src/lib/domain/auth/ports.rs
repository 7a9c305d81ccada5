use std::time::Duration;

use async_trait::async_trait;
use auth::JwtError;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token for an application.
    ///
    /// # Arguments
    /// * `ctx` - Cancellation and deadline for the call
    /// * `email` - Email the user registered with
    /// * `password` - Plaintext password
    /// * `app_id` - Application the token is issued for
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidAppId` - Application does not exist
    /// * `Cancelled` / `DeadlineExceeded` - Context ended first
    /// * `Internal` - Storage, hashing or signing failed
    async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `ctx` - Cancellation and deadline for the call
    /// * `email` - Email to register
    /// * `password` - Plaintext password (hashed before storage)
    ///
    /// # Returns
    /// Identifier assigned by storage
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Cancelled` / `DeadlineExceeded` - Context ended first
    /// * `Internal` - Storage or hashing failed
    async fn register(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError>;

    /// Check whether a user is an administrator.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this identifier
    /// * `Cancelled` / `DeadlineExceeded` - Context ended first
    /// * `Internal` - Storage failed
    async fn is_admin(&self, ctx: &RequestContext, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Store a user and return the identifier storage assigned.
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError>;
}

/// Reads users.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Database operation failed
    async fn user(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the administrator flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this identifier
    /// * `Database` - Database operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Reads applications.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - No application with this identifier
    /// * `Database` - Database operation failed
    async fn app(&self, app_id: AppId) -> Result<App, StorageError>;
}

/// Signs session tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Build and sign a token for `user` with the secret of `app`, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `InvalidSecret` - Application secret is unusable
    /// * `EncodingFailed` - Signing failed
    fn issue_token(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError>;
}
