use async_trait::async_trait;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::TokenClaims;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

/// Port for the four authentication use cases.
///
/// The HTTP layer depends on this trait only; it maps the returned
/// `UserError` variants onto status codes and never sees entities with a
/// password hash attached.
#[async_trait]
pub trait AuthUseCases: Send + Sync + 'static {
    /// Register a new account and issue a session token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `NoLoginMethod` - Neither password nor external identity supplied
    /// * `DatabaseError` - Persistence failed
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthResult, UserError>;

    /// Verify credentials and issue a fresh session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, passwordless account, or
    ///   wrong password; indistinguishable by design
    async fn login(&self, credentials: Credentials) -> Result<AuthResult, UserError>;

    /// Revoke a session token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token does not verify
    async fn logout(&self, token: &str) -> Result<(), UserError>;

    /// Resolve an already-authenticated user id to its profile.
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    async fn current_user(&self, id: &UserId) -> Result<UserProfile, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier; `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address; `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve a user by external identity provider id; `None` if not
    /// found. Present for identity-provider accounts even though no use
    /// case exercises it yet.
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserError>;

    /// Apply a partial profile update and return the stored record.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn update(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Capability seam over hashing, token issue/verification, and revocation.
///
/// Use cases and the HTTP authentication gate depend on this trait, so the
/// concrete hashing, signing, and revocation machinery can vary without
/// touching orchestration.
#[async_trait]
pub trait AuthService: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    fn hash_password(&self, password: &str) -> Result<String, UserError>;

    /// Verify a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError>;

    /// Mint a session token for a user.
    fn generate_token(&self, user: &User) -> Result<String, UserError>;

    /// Verify a session token: signature, expiry, then revocation.
    ///
    /// `None` for every failure mode; callers must not learn which check
    /// rejected the token.
    async fn verify_token(&self, token: &str) -> Option<TokenClaims>;

    /// Revoke a token; idempotent. `false` if the token does not verify.
    async fn invalidate_token(&self, token: &str) -> bool;

    /// Whether a token has been explicitly revoked.
    async fn is_token_invalid(&self, token: &str) -> bool;
}
