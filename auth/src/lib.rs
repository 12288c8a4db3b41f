//! Authentication core library
//!
//! Provides the security-relevant pieces of the authentication service:
//! - Password hashing and verification (bcrypt, fixed work factor)
//! - Signed bearer token issuance with a fixed claim set and 1-day expiry
//! - Credential verification coordinating the two
//!
//! The HTTP surface, persistence, and session plumbing live in the service
//! crate; this library holds no shared mutable state. The only process-wide
//! input is the signing secret, injected at construction so tests can
//! substitute a fixed secret deterministically.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = Claims::for_user(1, "alice", "admin");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TOKEN_TTL_SECS;
pub use password::PasswordError;
pub use password::PasswordHasher;
