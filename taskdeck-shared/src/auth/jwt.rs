/// JWT token generation and validation
///
/// Tokens are signed with HS256 (HMAC-SHA256) and carry the username as the
/// subject. There is no server-side session state: every request presents the
/// token and it is re-validated each time.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: Configurable (default 24 hours)
/// - **Validation**: Signature, expiration, not-before, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new("alice".to_string());
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.sub, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim pinned into every token
const ISSUER: &str = "taskdeck";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer")]
    InvalidIssuer,
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (username)
/// - `iss`: Issuer (always "taskdeck")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username of the authenticated user
    pub sub: String,

    /// Issuer - always "taskdeck"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates new claims with the default 24 hour expiration
    pub fn new(username: String) -> Self {
        Self::with_expiration(username, Duration::hours(24))
    }

    /// Creates claims with a custom expiration
    ///
    /// # Example
    ///
    /// ```
    /// use taskdeck_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    ///
    /// let claims = Claims::with_expiration("alice".to_string(), Duration::hours(1));
    /// assert!(!claims.is_expired());
    /// ```
    pub fn with_expiration(username: String, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: username,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Security
///
/// The secret should be:
/// - At least 32 bytes (256 bits) for HS256
/// - Randomly generated
/// - Stored securely (environment variable or secret manager)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "taskdeck"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens, `JwtError::InvalidIssuer`
/// for a wrong issuer, and `JwtError::ValidationError` for anything else.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
