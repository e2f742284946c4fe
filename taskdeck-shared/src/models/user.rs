/// User model
///
/// A user account holds the username and the password-hashing material.
/// Passwords are stored as Argon2id hashes, never in plaintext; the salt is
/// generated once at sign-up and never changes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(64) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     salt VARCHAR(64) NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};

/// A user account
///
/// `username` is unique and immutable after creation. A user owns zero or
/// more tasks; task rows reference `id` as their owner.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store at creation
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Argon2id password hash (PHC string format)
    ///
    /// Never store plaintext passwords!
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Salt used to derive `password_hash`, generated once at sign-up
    #[serde(skip_serializing)]
    pub salt: String,
}

/// Input for creating a new user
///
/// The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,

    /// Salt the hash was derived with
    pub salt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_hides_credentials() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            salt: "c2FsdHNhbHQ".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("salt").is_none());
    }
}
