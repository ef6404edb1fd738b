use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::AuthService;
use crate::user::ports::AuthUseCases;
use crate::user::ports::UserRepository;

/// Domain service implementing the authentication use cases.
///
/// Stateless orchestration over the repository and the auth service; all
/// side effects live behind those two ports.
pub struct UserService<UR, AS>
where
    UR: UserRepository,
    AS: AuthService,
{
    repository: Arc<UR>,
    auth: Arc<AS>,
}

impl<UR, AS> UserService<UR, AS>
where
    UR: UserRepository,
    AS: AuthService,
{
    pub fn new(repository: Arc<UR>, auth: Arc<AS>) -> Self {
        Self { repository, auth }
    }
}

#[async_trait]
impl<UR, AS> AuthUseCases for UserService<UR, AS>
where
    UR: UserRepository,
    AS: AuthService,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthResult, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = match &command.password {
            Some(password) => Some(self.auth.hash_password(password.as_str())?),
            None => None,
        };

        let user = User::new(
            command.email,
            command.full_name,
            password_hash,
            command.google_id,
            command.avatar_url,
        )?;

        let user = self.repository.create(user).await?;
        let token = self.auth.generate_token(&user)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResult {
            user: UserProfile::from(&user),
            token,
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthResult, UserError> {
        // Unknown email, passwordless account, and wrong password all
        // collapse into the same outcome.
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(UserError::InvalidCredentials)?;

        if !self.auth.verify_password(&credentials.password, stored_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let token = self.auth.generate_token(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            user: UserProfile::from(&user),
            token,
        })
    }

    async fn logout(&self, token: &str) -> Result<(), UserError> {
        let claims = self
            .auth
            .verify_token(token)
            .await
            .ok_or(UserError::InvalidToken)?;

        self.auth.invalidate_token(token).await;

        tracing::info!(user_id = %claims.user_id, "User logged out");

        Ok(())
    }

    async fn current_user(&self, id: &UserId) -> Result<UserProfile, UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        Ok(UserProfile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::TokenClaims;
    use crate::domain::user::models::UpdateUserCommand;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestAuthService {}

        #[async_trait]
        impl AuthService for TestAuthService {
            fn hash_password(&self, password: &str) -> Result<String, UserError>;
            fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError>;
            fn generate_token(&self, user: &User) -> Result<String, UserError>;
            async fn verify_token(&self, token: &str) -> Option<TokenClaims>;
            async fn invalidate_token(&self, token: &str) -> bool;
            async fn is_token_invalid(&self, token: &str) -> bool;
        }
    }

    fn stored_user(email: &str, password_hash: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            full_name: "Test User".to_string(),
            avatar_url: None,
            password_hash: password_hash.map(str::to_string),
            google_id: if password_hash.is_none() {
                Some("google-123".to_string())
            } else {
                None
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn register_command(email: &str) -> RegisterUserCommand {
        RegisterUserCommand::with_password(
            EmailAddress::new(email.to_string()).unwrap(),
            "Test User".to_string(),
            Password::new("secret1".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();

        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.password_hash.as_deref() == Some("$argon2id$hash")
            })
            .times(1)
            .returning(|user| Ok(user));

        auth.expect_hash_password()
            .with(eq("secret1"))
            .times(1)
            .returning(|_| Ok("$argon2id$hash".to_string()));
        auth.expect_generate_token()
            .times(1)
            .returning(|_| Ok("token-abc".to_string()));

        let service = UserService::new(Arc::new(repository), Arc::new(auth));

        let result = service
            .register(register_command("test@example.com"))
            .await
            .unwrap();

        assert_eq!(result.user.email.as_str(), "test@example.com");
        assert_eq!(result.token, "token-abc");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored_user(email, Some("$argon2id$hash")))));
        repository.expect_create().times(0);
        auth.expect_hash_password().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(auth));

        let result = service.register(register_command("test@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();

        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|email| Ok(Some(stored_user(email, Some("$argon2id$hash")))));

        auth.expect_verify_password()
            .with(eq("secret1"), eq("$argon2id$hash"))
            .times(1)
            .returning(|_, _| Ok(true));
        auth.expect_generate_token()
            .times(1)
            .returning(|_| Ok("token-abc".to_string()));

        let service = UserService::new(Arc::new(repository), Arc::new(auth));

        let result = service
            .login(Credentials {
                email: "test@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.token, "token-abc");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        // Unknown email
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        let service = UserService::new(Arc::new(repository), Arc::new(MockTestAuthService::new()));
        let unknown_email = service
            .login(Credentials {
                email: "nobody@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        // Account without a password (external identity only)
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored_user(email, None))));
        let service = UserService::new(Arc::new(repository), Arc::new(MockTestAuthService::new()));
        let no_password = service
            .login(Credentials {
                email: "oauth@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        // Wrong password
        let mut repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored_user(email, Some("$argon2id$hash")))));
        auth.expect_verify_password()
            .times(1)
            .returning(|_, _| Ok(false));
        let service = UserService::new(Arc::new(repository), Arc::new(auth));
        let wrong_password = service
            .login(Credentials {
                email: "test@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        for outcome in [unknown_email, no_password, wrong_password] {
            assert!(matches!(outcome, Err(UserError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_logout_revokes_valid_token() {
        let repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();

        let user_id = UserId::new();
        auth.expect_verify_token()
            .with(eq("token-abc"))
            .times(1)
            .returning(move |_| {
                Some(TokenClaims {
                    user_id,
                    email: "test@example.com".to_string(),
                })
            });
        auth.expect_invalidate_token()
            .with(eq("token-abc"))
            .times(1)
            .returning(|_| true);

        let service = UserService::new(Arc::new(repository), Arc::new(auth));

        assert!(service.logout("token-abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_rejects_invalid_token() {
        let repository = MockTestUserRepository::new();
        let mut auth = MockTestAuthService::new();

        auth.expect_verify_token().times(1).returning(|_| None);
        auth.expect_invalidate_token().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(auth));

        let result = service.logout("garbage").await;
        assert!(matches!(result, Err(UserError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_current_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("test@example.com", Some("$argon2id$hash"));
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestAuthService::new()));

        let profile = service.current_user(&user_id).await.unwrap();
        assert_eq!(profile.id, user_id);
        assert_eq!(profile.email.as_str(), "test@example.com");
    }

    #[tokio::test]
    async fn test_current_user_vanished() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestAuthService::new()));

        let result = service.current_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
