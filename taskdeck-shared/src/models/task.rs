/// Task model
///
/// Tasks are the core entity of taskdeck. Every task belongs to exactly one
/// user; all reads and writes are scoped to that owner.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('open', 'in_progress', 'done');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     status task_status NOT NULL DEFAULT 'open',
///     owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};

/// Task status
///
/// Every task starts as `Open`. Status changes freely between the three
/// states via the owner-scoped status update; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Newly created, not yet started
    Open,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// A task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the store at creation
    pub id: i64,

    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// Owning user; set once at creation, never reassigned
    pub owner_id: i64,
}

/// Input for creating a new task
///
/// The store assigns the ID. The service layer always sets `status` to
/// [`TaskStatus::Open`] regardless of anything the caller supplied upstream.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub owner_id: i64,
}

/// Filter for listing tasks
///
/// Both filters are optional and combined with AND when present. `search`
/// matches case-insensitively as a substring of title or description.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Narrow to tasks with this status
    pub status: Option<TaskStatus>,

    /// Narrow to tasks whose title or description contains this text
    pub search: Option<String>,
}
