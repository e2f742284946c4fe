/// Task ownership core
///
/// Owner-scoped CRUD over tasks. Every operation takes the authenticated
/// owner resolved by the authentication core and restricts matching rows to
/// that owner; a task that exists but belongs to someone else is reported
/// exactly like a task that does not exist.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::models::task::TaskStatus;
/// use taskdeck_shared::models::user::User;
/// use taskdeck_shared::service::tasks::TaskService;
/// use taskdeck_shared::store::memory::InMemoryTaskStore;
///
/// # async fn example(alice: User) -> Result<(), Box<dyn std::error::Error>> {
/// let tasks = TaskService::new(Arc::new(InMemoryTaskStore::new()));
///
/// let task = tasks.create_task(&alice, "buy milk", "2%").await?;
/// assert_eq!(task.status, TaskStatus::Open);
///
/// let task = tasks.update_status(&alice, task.id, TaskStatus::Done).await?;
/// tasks.delete_task(&alice, task.id).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use tracing::{debug, error};

use super::ServiceError;
use crate::models::task::{NewTask, Task, TaskFilter, TaskStatus};
use crate::models::user::User;
use crate::store::{StoreError, TaskStore};

/// Task service
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Creates a task for the owner
    ///
    /// Status is always [`TaskStatus::Open`] at creation, regardless of
    /// anything the caller supplied upstream. Not idempotent: repeated calls
    /// create duplicate tasks, so callers must not auto-retry this.
    pub async fn create_task(
        &self,
        owner: &User,
        title: &str,
        description: &str,
    ) -> Result<Task, ServiceError> {
        let task = self
            .tasks
            .insert(NewTask {
                title: title.to_string(),
                description: description.to_string(),
                status: TaskStatus::Open,
                owner_id: owner.id,
            })
            .await
            .map_err(log_store_error)?;

        debug!(id = task.id, owner_id = owner.id, "Task created");
        Ok(task)
    }

    /// Fetches the owner's task by id
    ///
    /// # Errors
    ///
    /// [`ServiceError::TaskNotFound`] whether the task is absent or owned by
    /// someone else — the two cases are indistinguishable.
    pub async fn get_task(&self, owner: &User, id: i64) -> Result<Task, ServiceError> {
        self.tasks
            .find_by_id_and_owner(id, owner.id)
            .await
            .map_err(log_store_error)?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    /// Lists the owner's tasks, narrowed by the filter
    ///
    /// Optional status and search filters are AND-ed. Search matches
    /// case-insensitively as a substring of title or description. Results are
    /// ordered by id, so repeated calls over unchanged data agree.
    pub async fn list_tasks(
        &self,
        owner: &User,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, ServiceError> {
        self.tasks
            .list_by_owner(owner.id, filter)
            .await
            .map_err(log_store_error)
    }

    /// Updates the status of the owner's task
    ///
    /// A single conditional write; returns the updated task.
    pub async fn update_status(
        &self,
        owner: &User,
        id: i64,
        status: TaskStatus,
    ) -> Result<Task, ServiceError> {
        self.tasks
            .update_status(id, owner.id, status)
            .await
            .map_err(log_store_error)?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    /// Deletes the owner's task
    ///
    /// The delete itself is owner-scoped — there is no read-then-delete
    /// window in which ownership could change hands.
    pub async fn delete_task(&self, owner: &User, id: i64) -> Result<(), ServiceError> {
        let affected = self
            .tasks
            .delete_by_id_and_owner(id, owner.id)
            .await
            .map_err(log_store_error)?;

        if affected == 0 {
            return Err(ServiceError::TaskNotFound(id));
        }

        debug!(id, owner_id = owner.id, "Task deleted");
        Ok(())
    }
}

fn log_store_error(err: StoreError) -> ServiceError {
    error!("Task store operation failed: {}", err);
    ServiceError::Persistence
}
