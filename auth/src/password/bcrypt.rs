use super::errors::PasswordError;

/// Work factor for bcrypt hashing.
///
/// The cost exists to make brute-force guessing expensive; hashing and
/// verification are blocking CPU-bound calls and callers must not assume
/// sub-millisecond latency.
pub const COST: u32 = 8;

/// Password hashing implementation.
///
/// Wraps bcrypt: salted, adaptive, one-way. Each call to [`hash`] embeds a
/// fresh random salt, so two hashes of the same plaintext differ while both
/// verify against it.
///
/// [`hash`]: PasswordHasher::hash
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a password hasher with the fixed default work factor.
    pub fn new() -> Self {
        Self { cost: COST }
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Returns
    /// A bcrypt digest string carrying the algorithm, cost, and salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed (e.g. invalid cost)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// # Returns
    /// True if the password matches, false otherwise.
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored digest is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
