//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Session token signing and validation (JWT, HS256)
//!
//! Each service defines its own authentication ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify(&hash, "my_password").unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::{JwtHandler, SessionClaims};
//!
//! let handler = JwtHandler::new(b"per_application_secret").unwrap();
//! let claims = SessionClaims::for_session(1, "a@x.com", 1, Duration::from_secs(3600)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded: SessionClaims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.uid, 1);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
