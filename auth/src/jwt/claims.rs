use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token lifetime: exactly one day from issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in every issued token.
///
/// The claim set is fixed: three semantic fields describing the
/// authenticated subject, plus issuance and expiry timestamps. Tokens are
/// self-contained and stateless; no server-side record is needed to
/// validate them later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id of the authenticated user
    pub subject: i64,

    /// Username of the authenticated user
    pub username: String,

    /// Role of the authenticated user
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat + TOKEN_TTL_SECS`
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Store-assigned user identity
    /// * `username` - Username of the authenticated user
    /// * `role` - Role label carried in the token
    ///
    /// # Returns
    /// Claims expiring one day from now
    pub fn for_user(user_id: i64, username: impl Into<String>, role: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();

        Self {
            subject: user_id,
            username: username.into(),
            role: role.into(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
