#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth_service::domain::auth::errors::StorageError;
use auth_service::domain::auth::models::App;
use auth_service::domain::auth::models::AppId;
use auth_service::domain::auth::models::User;
use auth_service::domain::auth::models::UserId;
use auth_service::domain::auth::ports::AppProvider;
use auth_service::domain::auth::ports::UserProvider;
use auth_service::domain::auth::ports::UserSaver;
use auth_service::domain::auth::service::AuthService;
use auth_service::outbound::JwtTokenIssuer;

pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const APP_ID: AppId = AppId(1);
pub const APP_SECRET: &[u8] = b"test-app-secret";

pub type TestAuthService =
    AuthService<InMemoryStorage, InMemoryStorage, InMemoryStorage, JwtTokenIssuer>;

/// Storage double implementing every port over in-process maps.
#[derive(Default)]
pub struct InMemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: HashMap<String, User>,
    admins: Vec<UserId>,
    apps: HashMap<AppId, App>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage seeded with the default test application.
    pub fn with_default_app() -> Self {
        let storage = Self::new();
        storage.add_app(APP_ID, "test-app", APP_SECRET);
        storage
    }

    pub fn add_app(&self, id: AppId, name: &str, secret: &[u8]) {
        self.inner.lock().unwrap().apps.insert(
            id,
            App {
                id,
                name: name.to_string(),
                secret: secret.to_vec(),
            },
        );
    }

    pub fn grant_admin(&self, user_id: UserId) {
        self.inner.lock().unwrap().admins.push(user_id);
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

#[async_trait]
impl UserSaver for InMemoryStorage {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.contains_key(email) {
            return Err(StorageError::UserExists);
        }

        inner.next_id += 1;
        let id = UserId(inner.next_id);
        inner.users.insert(
            email.to_string(),
            User {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_vec(),
            },
        );

        Ok(id)
    }
}

#[async_trait]
impl UserProvider for InMemoryStorage {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        self.inner
            .lock()
            .unwrap()
            .users
            .get(email)
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        let inner = self.inner.lock().unwrap();
        if !inner.users.values().any(|user| user.id == user_id) {
            return Err(StorageError::UserNotFound);
        }
        Ok(inner.admins.contains(&user_id))
    }
}

#[async_trait]
impl AppProvider for InMemoryStorage {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        self.inner
            .lock()
            .unwrap()
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}

/// Build a service whose ports all point at `storage`.
pub fn auth_service(storage: Arc<InMemoryStorage>) -> Arc<TestAuthService> {
    Arc::new(AuthService::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        storage,
        Arc::new(JwtTokenIssuer::new()),
        TOKEN_TTL,
    ))
}
