use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// Domain service implementation for authentication.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no mutable state, so one instance can serve concurrent calls behind an `Arc`.
pub struct AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    token_issuer: Arc<TI>,
    password_hasher: auth::PasswordHasher,
    token_ttl: Duration,
}

impl<US, UP, AP, TI> AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - User persistence implementation
    /// * `user_provider` - User lookup implementation
    /// * `app_provider` - Application lookup implementation
    /// * `token_issuer` - Session token signer
    /// * `token_ttl` - Lifetime of every issued token
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_issuer: Arc<TI>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
            token_ttl,
        }
    }
}

/// Argon2id hash of no real password, verified in place of a missing account
/// so unknown emails cost the same as wrong passwords.
const DUMMY_PASSWORD_HASH: &[u8] = b"$argon2id$v=19$m=19456,t=2,p=1$K8mQBZRzRI5uvUQqoWv6oA$cFAAJ8PxoPjACO6tlxUYa7ZZ3aMJfBcxgD6Vvzk3xR4";

/// Run CPU-bound work on the blocking pool, bounded by `ctx`.
///
/// When the context ends first the step is abandoned, not aborted: the caller
/// gets `Cancelled` or `DeadlineExceeded` while the work runs to completion on
/// the pool and its result is discarded.
async fn blocking<F, T>(ctx: &RequestContext, op: &'static str, work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    ctx.run(op, tokio::task::spawn_blocking(work))
        .await?
        .map_err(|e| AuthError::internal(op, e))
}

#[async_trait]
impl<US, UP, AP, TI> AuthServicePort for AuthService<US, UP, AP, TI>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
    TI: TokenIssuer,
{
    async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        const OP: &str = "auth.login";

        tracing::info!(op = OP, email = %email, app_id = %app_id, "attempting to login user");

        let user = match ctx.run(OP, self.user_provider.user(email)).await? {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!(op = OP, email = %email, "user not found");
                let hasher = self.password_hasher;
                let password = password.to_owned();
                let _ = blocking(ctx, OP, move || {
                    hasher.verify(DUMMY_PASSWORD_HASH, &password)
                })
                .await?;
                return Err(AuthError::InvalidCredentials { op: OP });
            }
            Err(e) => {
                tracing::error!(op = OP, email = %email, error = %e, "failed to get user");
                return Err(AuthError::internal(OP, e));
            }
        };

        let hasher = self.password_hasher;
        let password_hash = user.password_hash.clone();
        let password = password.to_owned();
        match blocking(ctx, OP, move || hasher.verify(&password_hash, &password)).await? {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(op = OP, email = %email, "invalid credentials");
                return Err(AuthError::InvalidCredentials { op: OP });
            }
            Err(e) => {
                tracing::error!(
                    op = OP,
                    user_id = %user.id,
                    error = %e,
                    "failed to verify password"
                );
                return Err(AuthError::internal(OP, e));
            }
        }

        let app = match ctx.run(OP, self.app_provider.app(app_id)).await? {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                tracing::warn!(op = OP, app_id = %app_id, "app not found");
                return Err(AuthError::InvalidAppId { op: OP, app_id });
            }
            Err(e) => {
                tracing::error!(op = OP, app_id = %app_id, error = %e, "failed to get app");
                return Err(AuthError::internal(OP, e));
            }
        };

        ctx.check(OP)?;
        let token = self
            .token_issuer
            .issue_token(&user, &app, self.token_ttl)
            .map_err(|e| {
                tracing::error!(op = OP, app_id = %app_id, error = %e, "failed to generate token");
                AuthError::internal(OP, e)
            })?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app_id, "user logged in successfully");

        Ok(token)
    }

    async fn register(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        const OP: &str = "auth.register";

        tracing::info!(op = OP, email = %email, "registering user");

        let hasher = self.password_hasher;
        let password = password.to_owned();
        let password_hash = blocking(ctx, OP, move || hasher.hash(&password))
            .await?
            .map_err(|e| {
                tracing::error!(op = OP, error = %e, "failed to generate password hash");
                AuthError::internal(OP, e)
            })?;

        let user_id = match ctx
            .run(OP, self.user_saver.save_user(email, &password_hash))
            .await?
        {
            Ok(user_id) => user_id,
            Err(StorageError::UserExists) => {
                tracing::warn!(op = OP, email = %email, "user already exists");
                return Err(AuthError::UserAlreadyExists { op: OP });
            }
            Err(e) => {
                tracing::error!(op = OP, email = %email, error = %e, "failed to save user");
                return Err(AuthError::internal(OP, e));
            }
        };

        tracing::info!(op = OP, user_id = %user_id, "user registered");

        Ok(user_id)
    }

    async fn is_admin(&self, ctx: &RequestContext, user_id: UserId) -> Result<bool, AuthError> {
        const OP: &str = "auth.is_admin";

        tracing::info!(op = OP, user_id = %user_id, "checking if user is admin");

        let is_admin = match ctx.run(OP, self.user_provider.is_admin(user_id)).await? {
            Ok(is_admin) => is_admin,
            Err(StorageError::UserNotFound) => {
                tracing::warn!(op = OP, user_id = %user_id, "user not found");
                return Err(AuthError::UserNotFound { op: OP, user_id });
            }
            Err(e) => {
                tracing::error!(op = OP, user_id = %user_id, error = %e, "failed to check admin flag");
                return Err(AuthError::internal(OP, e));
            }
        };

        tracing::info!(op = OP, user_id = %user_id, is_admin, "checked if user is admin");

        Ok(is_admin)
    }
}
