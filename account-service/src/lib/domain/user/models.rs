use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Immutable snapshot owned by the persistence layer; use cases never
/// mutate it in place.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Construct a new user, enforcing the login-method invariant: a user
    /// must carry a password hash, an external identity id, or both —
    /// never neither, otherwise no login path exists.
    pub fn new(
        email: EmailAddress,
        full_name: String,
        password_hash: Option<String>,
        google_id: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Self, UserError> {
        if password_hash.is_none() && google_id.is_none() {
            return Err(UserError::NoLoginMethod);
        }

        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            email,
            full_name,
            avatar_url,
            password_hash,
            google_id,
            created_at: now,
            updated_at: now,
        })
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at the registration edge.
///
/// Only the length policy lives here; hashing happens in the auth service.
/// Never persisted and deliberately not `Debug`-printable.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Create a policy-checked password.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        // Characters, not bytes: a 5-character multibyte password is short.
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub full_name: String,
    pub password: Option<Password>,
    pub google_id: Option<String>,
    pub avatar_url: Option<String>,
}

impl RegisterUserCommand {
    /// Command for a password-based registration (the only flow the HTTP
    /// surface exposes today).
    pub fn with_password(email: EmailAddress, full_name: String, password: Password) -> Self {
        Self {
            email,
            full_name,
            password: Some(password),
            google_id: None,
            avatar_url: None,
        }
    }
}

/// Command to update an existing user's mutable profile fields.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Transient login input; never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Claims attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub email: String,
}

/// User projection with the password hash stripped.
///
/// The only user shape that ever leaves a use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            google_id: user.google_id.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Outcome of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: UserProfile,
    pub token: String,
}
