use std::sync::Arc;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::revocation::RevocationStore;

/// Authentication coordinator combining password hashing, session token
/// issue/verification, and token revocation.
///
/// This is the single capability surface the account service depends on;
/// hashing, signing, and revocation can each change behind it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    revocations: Arc<RevocationStore>,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing (at least 32 bytes)
    /// * `token_ttl` - Lifetime of issued session tokens
    /// * `revocations` - Shared revocation store; the caller owns its
    ///   compaction task
    pub fn new(jwt_secret: &[u8], token_ttl: Duration, revocations: Arc<RevocationStore>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            revocations,
            token_ttl,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, hash)
    }

    /// Mint a session token bound to a user identity.
    pub fn generate_token(&self, user_id: &str, email: &str) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, email, self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a session token and return its claims.
    ///
    /// Checks signature and expiry first (cheap structural rejection), then
    /// consults the revocation store. Every failure mode yields `None`;
    /// callers cannot tell a forged token from an expired or revoked one.
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        let claims = self.jwt_handler.decode(token).ok()?;

        if self.revocations.is_revoked(token) {
            return None;
        }

        Some(claims)
    }

    /// Revoke a token so it fails verification before its natural expiry.
    ///
    /// Idempotent. Tokens that do not verify structurally are not recorded;
    /// they are already rejected without a revocation entry.
    ///
    /// # Returns
    /// `true` if the token was valid and is now revoked
    pub fn invalidate_token(&self, token: &str) -> bool {
        match self.jwt_handler.decode(token) {
            Ok(claims) => {
                self.revocations.revoke(token, claims.exp);
                true
            }
            Err(_) => false,
        }
    }

    /// Check whether a token has been explicitly revoked.
    pub fn is_token_invalid(&self, token: &str) -> bool {
        self.revocations.is_revoked(token)
    }
}
