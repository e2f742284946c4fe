/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing with an explicit per-user salt
/// - [`jwt`]: JWT token generation and validation (HS256)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: Password verification never short-circuits

pub mod jwt;
pub mod password;
