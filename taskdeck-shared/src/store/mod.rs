/// Persistence ports
///
/// The service cores depend only on the [`UserStore`] and [`TaskStore`]
/// traits defined here; concrete backends live in submodules. Services
/// receive a store as an `Arc<dyn …>` at construction, so tests substitute
/// the in-memory backend without touching the cores.
///
/// # Modules
///
/// - `postgres`: sqlx-backed adapters for production
/// - `memory`: in-memory adapters with identical semantics, for tests
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::store::{memory::InMemoryUserStore, UserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
/// assert!(store.find_by_username("alice").await?.is_none());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::task::{NewTask, Task, TaskFilter, TaskStatus};
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

/// Error type reported by store implementations
///
/// `UniqueViolation` is the one backend condition the services need to tell
/// apart (duplicate username at sign-up). Everything else is opaque: the
/// description in `Backend` is for logs, never for API responses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A column declared unique rejected a duplicate value
    #[error("unique constraint violated")]
    UniqueViolation,

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence port for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user, assigning its ID
    ///
    /// Fails with [`StoreError::UniqueViolation`] if the username is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Finds a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Persistence port for task records
///
/// Every method is owner-scoped: a task is invisible and inoperable to any
/// user other than its owner.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task, assigning its ID
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Finds the task matching both `id` and `owner_id`
    async fn find_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Task>, StoreError>;

    /// Lists the owner's tasks, narrowed by the filter, ordered by id
    async fn list_by_owner(
        &self,
        owner_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError>;

    /// Updates the status of the task matching both `id` and `owner_id`
    ///
    /// Returns the updated task, or `None` if no row matched. The update is
    /// a single conditional write; there is no separate read.
    async fn update_status(
        &self,
        id: i64,
        owner_id: i64,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes the task matching both `id` and `owner_id`
    ///
    /// Returns the number of rows affected (0 or 1).
    async fn delete_by_id_and_owner(&self, id: i64, owner_id: i64) -> Result<u64, StoreError>;
}
