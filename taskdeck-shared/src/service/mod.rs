/// Service cores
///
/// The two orchestration layers of taskdeck, each built over a persistence
/// port injected at construction:
///
/// - [`auth`]: sign-up, sign-in, and per-request token verification
/// - [`tasks`]: owner-scoped task CRUD
///
/// Both report failures through [`ServiceError`]; the HTTP layer maps those
/// kinds onto status codes.

pub mod auth;
pub mod tasks;

/// Domain error taxonomy
///
/// Four kinds, deliberately coarse:
///
/// - `UsernameConflict`: sign-up with an already-registered username
/// - `InvalidCredentials`: unknown username, wrong password, or a token for a
///   user that no longer exists — indistinguishable by design, so usernames
///   cannot be enumerated
/// - `TaskNotFound`: the task does not exist or belongs to someone else —
///   also indistinguishable by design
/// - `Persistence`: the store failed unexpectedly; the cause is logged where
///   it happened and never carried in the error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Username already exists")]
    UsernameConflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("task with id \"{0}\" not found")]
    TaskNotFound(i64),

    #[error("persistence failure")]
    Persistence,
}
