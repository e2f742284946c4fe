/// PostgreSQL store adapters
///
/// sqlx-backed implementations of the persistence ports. Owner scoping is
/// enforced in SQL: every task read/write matches on `id AND owner_id`, so a
/// foreign-owned task behaves exactly like a missing one.
///
/// Unique-violation detection goes through the driver's error kind rather
/// than a database-specific error code, so the port stays backend-agnostic.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::NewUser;
/// use taskdeck_shared::store::{postgres::PgUserStore, UserStore};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgUserStore::new(pool);
/// let user = store
///     .insert(NewUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         salt: "c2FsdHNhbHQ".to_string(),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TaskStore, UserStore};
use crate::models::task::{NewTask, Task, TaskFilter, TaskStatus};
use crate::models::user::{NewUser, User};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// User store backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, salt)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, salt
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.salt)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, salt
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Task store backed by PostgreSQL
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, owner_id
            "#,
        )
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, owner_id
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError> {
        // ILIKE keeps the search case-insensitive; ordering by id keeps
        // repeated calls stable.
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, owner_id
            FROM tasks
            WHERE owner_id = $1
              AND ($2::task_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%'
                                    OR description ILIKE '%' || $3 || '%')
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .bind(filter.status)
        .bind(filter.search.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update_status(
        &self,
        id: i64,
        owner_id: i64,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, status, owner_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_by_id_and_owner(&self, id: i64, owner_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
