/// Authentication core
///
/// Orchestrates sign-up (salt + hash + persist), sign-in (lookup + verify +
/// token issuance), and per-request token verification. Depends only on the
/// [`UserStore`] port and the JWT secret handed over at construction.
///
/// Unknown username and wrong password produce the identical
/// [`ServiceError::InvalidCredentials`]; the distinction never leaves this
/// module.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::service::auth::AuthService;
/// use taskdeck_shared::store::memory::InMemoryUserStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(
///     Arc::new(InMemoryUserStore::new()),
///     "test-secret-key-at-least-32-bytes-long".to_string(),
/// );
///
/// auth.sign_up("alice", "secret1").await?;
/// let token = auth.sign_in("alice", "secret1").await?;
/// let user = auth.verify(&token).await?;
/// assert_eq!(user.username, "alice");
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error};

use super::ServiceError;
use crate::auth::{jwt, password};
use crate::models::user::{NewUser, User};
use crate::store::{StoreError, UserStore};

/// Authentication service
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    /// Creates a service with the default 24 hour token lifetime
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: String) -> Self {
        Self::with_token_ttl(users, jwt_secret, Duration::hours(24))
    }

    /// Creates a service with a custom token lifetime
    pub fn with_token_ttl(
        users: Arc<dyn UserStore>,
        jwt_secret: String,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            jwt_secret,
            token_ttl,
        }
    }

    /// Registers a new user
    ///
    /// Generates a fresh salt, hashes the password with it, and persists the
    /// record. Exactly one user row is created, or none on failure.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::UsernameConflict`] if the username is taken
    /// - [`ServiceError::Persistence`] on any other store or hashing failure;
    ///   the underlying cause is logged, not returned
    pub async fn sign_up(&self, username: &str, pass: &str) -> Result<(), ServiceError> {
        let salt = password::generate_salt();
        let password_hash = password::hash_password(pass, &salt).map_err(|e| {
            error!(username, "Password hashing failed: {}", e);
            ServiceError::Persistence
        })?;

        let user = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
                salt,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => {
                    error!(username, "Duplicated username appeared");
                    ServiceError::UsernameConflict
                }
                StoreError::Backend(cause) => {
                    error!(username, "User insert failed: {}", cause);
                    ServiceError::Persistence
                }
            })?;

        debug!(username = %user.username, id = user.id, "New user created");
        Ok(())
    }

    /// Authenticates a user and issues a signed token carrying the username
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidCredentials`] for an unknown username or a
    /// wrong password — the same error for both.
    pub async fn sign_in(&self, username: &str, pass: &str) -> Result<String, ServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(log_store_error)?
            .ok_or(ServiceError::InvalidCredentials)?;

        let valid = password::verify_password(pass, &user.password_hash).map_err(|e| {
            error!(username, "Password verification failed: {}", e);
            ServiceError::Persistence
        })?;
        if !valid {
            return Err(ServiceError::InvalidCredentials);
        }

        let claims = jwt::Claims::with_expiration(user.username, self.token_ttl);
        let token = jwt::create_token(&claims, &self.jwt_secret).map_err(|e| {
            error!(username, "Token creation failed: {}", e);
            ServiceError::Persistence
        })?;

        Ok(token)
    }

    /// Verifies a token and resolves the authenticated user
    ///
    /// Checks signature, expiry, and issuer, then looks the embedded username
    /// up in the store: a valid token for a since-removed user is rejected
    /// the same way as a bad token.
    pub async fn verify(&self, token: &str) -> Result<User, ServiceError> {
        let claims = jwt::validate_token(token, &self.jwt_secret)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        self.users
            .find_by_username(&claims.sub)
            .await
            .map_err(log_store_error)?
            .ok_or(ServiceError::InvalidCredentials)
    }
}

fn log_store_error(err: StoreError) -> ServiceError {
    error!("User lookup failed: {}", err);
    ServiceError::Persistence
}
