//! Password hashing utilities

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (salted internally)
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a password against a bcrypt hash (constant-time comparison)
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}
