//! Authentication infrastructure library
//!
//! Provides the building blocks the account service composes into its
//! authentication capability:
//! - Password hashing (Argon2id, salted, slow by construction)
//! - JWT session token issue and verification
//! - In-memory token revocation with periodic compaction
//! - An [`Authenticator`] coordinating all three
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use auth::Authenticator;
//! use auth::RevocationStore;
//! use chrono::Duration;
//!
//! let revocations = Arc::new(RevocationStore::new());
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!!",
//!     Duration::days(7),
//!     Arc::clone(&revocations),
//! );
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//! assert!(auth.verify_password("password123", &hash).unwrap());
//!
//! // Login: mint a session token
//! let token = auth.generate_token("user123", "alice@example.com").unwrap();
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // Logout: revoke before natural expiry
//! auth.invalidate_token(&token);
//! assert!(auth.verify_token(&token).is_none());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::RevocationStore;
