/// Password hashing module using Argon2id
///
/// Unlike the more common embedded-salt flow, the salt is generated
/// separately with [`generate_salt`] and stored on the user record: it is
/// created exactly once at sign-up and never changes. [`hash_password`] then
/// derives a PHC-format hash from the plaintext and that salt.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{generate_salt, hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let salt = generate_salt();
/// let hash = hash_password("super_secret_password_123", &salt)?;
///
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),

    /// Invalid salt format
    #[error("Invalid salt format: {0}")]
    InvalidSalt(String),
}

/// Generates a fresh random salt
///
/// Returns the salt in PHC b64 form, suitable for storage on the user record
/// and for passing to [`hash_password`]. Uses the OS RNG.
pub fn generate_salt() -> String {
    SaltString::generate(&mut OsRng).as_str().to_string()
}

/// Hashes a password with the given salt using Argon2id
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
/// * `salt` - PHC b64 salt, as produced by [`generate_salt`]
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash):
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::InvalidSalt` if the salt is not valid PHC b64,
/// `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str, salt: &str) -> Result<String, PasswordError> {
    let salt = SaltString::from_b64(salt)
        .map_err(|e| PasswordError::InvalidSalt(format!("Failed to parse salt: {}", e)))?;

    // - m_cost: 64 MB (65536 KB) of memory
    // - t_cost: 3 iterations
    // - p_cost: 4 parallel lanes
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Comparison is constant-time; a wrong password and an unknown password take
/// the same path.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed,
/// `PasswordError::VerifyError` on any other verification failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are embedded in the hash
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}
