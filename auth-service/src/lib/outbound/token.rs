use std::time::Duration;

use auth::JwtError;
use auth::JwtHandler;
use auth::SessionClaims;

use crate::domain::auth::models::App;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::TokenIssuer;

/// Signs HS256 session tokens with the secret of the requesting application.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_token(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
        let handler = JwtHandler::new(&app.secret)?;
        let claims = SessionClaims::for_session(user.id.0, user.email.clone(), app.id.0, ttl)?;

        handler.encode(&claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::auth::models::AppId;
    use crate::domain::auth::models::UserId;

    fn user() -> User {
        User {
            id: UserId(1),
            email: "a@x.com".to_string(),
            password_hash: Vec::new(),
        }
    }

    fn app(secret: &[u8]) -> App {
        App {
            id: AppId(7),
            name: "test-app".to_string(),
            secret: secret.to_vec(),
        }
    }

    #[test]
    fn test_token_carries_session_claims() {
        let ttl = Duration::from_secs(3600);
        let now = Utc::now().timestamp();

        let token = JwtTokenIssuer::new()
            .issue_token(&user(), &app(b"app-secret"), ttl)
            .unwrap();

        let claims: SessionClaims = JwtHandler::new(b"app-secret")
            .unwrap()
            .decode(&token)
            .unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.uid, 1);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.app_id, 7);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!((claims.exp - (now + 3600)).abs() <= 2);
    }

    #[test]
    fn test_token_signed_with_app_secret() {
        let token = JwtTokenIssuer::new()
            .issue_token(&user(), &app(b"app-secret"), Duration::from_secs(60))
            .unwrap();

        let result = JwtHandler::new(b"other-secret")
            .unwrap()
            .decode::<SessionClaims>(&token);

        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_empty_app_secret_fails() {
        let result = JwtTokenIssuer::new().issue_token(&user(), &app(b""), Duration::from_secs(60));

        assert!(matches!(result, Err(JwtError::InvalidSecret(_))));
    }
}
