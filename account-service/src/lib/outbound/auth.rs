use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::TokenClaims;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthService;
use crate::user::errors::UserError;

/// `AuthService` adapter over the auth crate's [`Authenticator`].
pub struct JwtAuthService {
    authenticator: Arc<Authenticator>,
}

impl JwtAuthService {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        self.authenticator
            .verify_password(password, hash)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))
    }

    fn generate_token(&self, user: &User) -> Result<String, UserError> {
        self.authenticator
            .generate_token(&user.id.to_string(), user.email.as_str())
            .map_err(|e| UserError::TokenGeneration(e.to_string()))
    }

    async fn verify_token(&self, token: &str) -> Option<TokenClaims> {
        let claims = self.authenticator.verify_token(token)?;
        // A subject that is not a UUID cannot belong to any user this
        // service issued a token for.
        let user_id = UserId::from_string(&claims.sub).ok()?;

        Some(TokenClaims {
            user_id,
            email: claims.email,
        })
    }

    async fn invalidate_token(&self, token: &str) -> bool {
        self.authenticator.invalidate_token(token)
    }

    async fn is_token_invalid(&self, token: &str) -> bool {
        self.authenticator.is_token_invalid(token)
    }
}
