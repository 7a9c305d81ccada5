use std::time::Duration as StdDuration;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by a session token.
///
/// `sub` holds the user identifier as a string (RFC 7519); `uid` repeats it as a
/// number for consumers that want it typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// User identifier
    pub uid: i64,

    /// User email address
    pub email: String,

    /// Application the token was issued for
    pub app_id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user session issued at `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email address
    /// * `app_id` - Application identifier
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - `ttl` does not fit a timestamp
    pub fn new(
        user_id: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: StdDuration,
    ) -> Result<Self, JwtError> {
        let expires_at = Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::EncodingFailed(format!("token ttl out of range: {:?}", ttl))
            })?;

        Ok(Self {
            sub: user_id.to_string(),
            uid: user_id,
            email: email.into(),
            app_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Create claims for a user session issued now.
    pub fn for_session(
        user_id: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: StdDuration,
    ) -> Result<Self, JwtError> {
        Self::new(user_id, email, app_id, Utc::now(), ttl)
    }
}
