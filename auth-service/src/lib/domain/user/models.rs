use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::RoleNameError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Created at registration, read at login, never mutated by this service.
/// The identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub role: RoleName,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
/// Stored case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role name value type
///
/// A label carried in issued tokens; this service has no permission engine
/// behind it. Well-formedness: trimmed, non-empty, at most 32 characters.
/// Membership in a configured recognized set is checked separately via
/// [`RoleName::recognized_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 32;

    /// Create a new well-formed role name.
    ///
    /// Surrounding whitespace is stripped before validation.
    ///
    /// # Errors
    /// * `Empty` - Role name is missing or whitespace-only
    /// * `TooLong` - Role name longer than 32 characters
    pub fn new(role_name: String) -> Result<Self, RoleNameError> {
        let trimmed = role_name.trim();

        if trimmed.is_empty() {
            return Err(RoleNameError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(RoleNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: trimmed.len(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Check membership in a recognized set of role names.
    ///
    /// An empty set accepts any well-formed role.
    ///
    /// # Errors
    /// * `NotRecognized` - Role is not in the non-empty allowed set
    pub fn recognized_in(&self, allowed: &[String]) -> Result<(), RoleNameError> {
        if allowed.is_empty() || allowed.iter().any(|r| r == &self.0) {
            Ok(())
        } else {
            Err(RoleNameError::NotRecognized(self.0.clone()))
        }
    }

    /// Get role name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User record candidate handed to the store, which assigns the identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub role: RoleName,
    pub created_at: DateTime<Utc>,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub role: RoleName,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new register user command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `role` - Validated role name
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, role: RoleName, password: String) -> Self {
        Self {
            username,
            role,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        let username = Username::new("anna_01".to_string()).unwrap();
        assert_eq!(username.as_str(), "anna_01");
    }

    #[test]
    fn test_username_too_short() {
        let result = Username::new("ab".to_string());
        assert!(matches!(result, Err(UsernameError::TooShort { .. })));
    }

    #[test]
    fn test_username_invalid_chars() {
        let result = Username::new("anna!".to_string());
        assert!(matches!(result, Err(UsernameError::InvalidCharacters)));
    }

    #[test]
    fn test_role_name_trims_whitespace() {
        let role = RoleName::new("  angel  ".to_string()).unwrap();
        assert_eq!(role.as_str(), "angel");
    }

    #[test]
    fn test_role_name_empty() {
        let result = RoleName::new("   ".to_string());
        assert!(matches!(result, Err(RoleNameError::Empty)));
    }

    #[test]
    fn test_role_name_too_long() {
        let result = RoleName::new("r".repeat(33));
        assert!(matches!(result, Err(RoleNameError::TooLong { .. })));
    }

    #[test]
    fn test_role_name_recognized_in_empty_set() {
        let role = RoleName::new("angel".to_string()).unwrap();
        assert!(role.recognized_in(&[]).is_ok());
    }

    #[test]
    fn test_role_name_not_recognized() {
        let role = RoleName::new("angel".to_string()).unwrap();
        let allowed = vec!["admin".to_string(), "student".to_string()];
        assert!(matches!(
            role.recognized_in(&allowed),
            Err(RoleNameError::NotRecognized(_))
        ));
    }
}
