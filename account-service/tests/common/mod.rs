use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::config::RateLimitConfig;
use account_service::domain::user::models::UpdateUserCommand;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::AuthService;
use account_service::domain::user::ports::AuthUseCases;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::auth::JwtAuthService;
use account_service::user::errors::UserError;
use async_trait::async_trait;
use auth::Authenticator;
use auth::RevocationStore;
use chrono::Duration;
use chrono::Utc;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router on a random port, backed
/// by an in-memory repository so no external services are needed.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub revocations: Arc<RevocationStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_token_ttl(Duration::hours(1)).await
    }

    /// Spawn with a custom token lifetime; a negative TTL issues tokens
    /// that are already expired.
    pub async fn spawn_with_token_ttl(token_ttl: Duration) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let revocations = Arc::new(RevocationStore::new());
        let authenticator = Arc::new(Authenticator::new(
            TEST_JWT_SECRET,
            token_ttl,
            Arc::clone(&revocations),
        ));
        let auth_service = Arc::new(JwtAuthService::new(authenticator));

        let repository = Arc::new(InMemoryUserRepository::new());
        let use_cases: Arc<dyn AuthUseCases> = Arc::new(UserService::new(
            repository,
            Arc::clone(&auth_service),
        ));

        let rate_limit = RateLimitConfig {
            window_secs: 60,
            max_requests: 10_000,
        };

        let router = create_router(use_cases, auth_service as Arc<dyn AuthService>, &rate_limit);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            revocations,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register a user and return the issued token.
    pub async fn register(&self, email: &str, full_name: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "fullName": full_name,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("No token in register response")
            .to_string()
    }
}

/// In-memory `UserRepository` with the same uniqueness semantics as the
/// Postgres implementation.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn update(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(full_name) = command.full_name {
            user.full_name = full_name;
        }
        if let Some(avatar_url) = command.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
