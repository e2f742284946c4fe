/// In-memory store adapters
///
/// Mutex-guarded implementations of the persistence ports with the same
/// observable semantics as the PostgreSQL adapters: sequential ids, username
/// uniqueness, id-ordered listing, case-insensitive substring search. Used by
/// the service unit tests and the API integration tests, where spinning up a
/// database would buy nothing.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{StoreError, TaskStore, UserStore};
use crate::models::task::{NewTask, Task, TaskFilter, TaskStatus};
use crate::models::user::{NewUser, User};

/// User store backed by a Vec
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: Mutex<UserRows>,
}

#[derive(Default)]
struct UserRows {
    next_id: i64,
    rows: Vec<User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("user store lock poisoned");

        if inner.rows.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation);
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: user.username,
            password_hash: user.password_hash,
            salt: user.salt,
        };
        inner.rows.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("user store lock poisoned");
        Ok(inner.rows.iter().find(|u| u.username == username).cloned())
    }
}

/// Task store backed by a Vec
#[derive(Default)]
pub struct InMemoryTaskStore {
    inner: Mutex<TaskRows>,
}

#[derive(Default)]
struct TaskRows {
    next_id: i64,
    rows: Vec<Task>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }

    if let Some(ref search) = filter.search {
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }
    }

    true
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut inner = self.inner.lock().expect("task store lock poisoned");

        inner.next_id += 1;
        let task = Task {
            id: inner.next_id,
            title: task.title,
            description: task.description,
            status: task.status,
            owner_id: task.owner_id,
        };
        inner.rows.push(task.clone());

        Ok(task)
    }

    async fn find_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Task>, StoreError> {
        let inner = self.inner.lock().expect("task store lock poisoned");
        Ok(inner
            .rows
            .iter()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.lock().expect("task store lock poisoned");

        // Rows are kept in insertion order, which is id order
        Ok(inner
            .rows
            .iter()
            .filter(|t| t.owner_id == owner_id && matches_filter(t, filter))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: i64,
        owner_id: i64,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.lock().expect("task store lock poisoned");

        let task = inner
            .rows
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id);

        Ok(task.map(|t| {
            t.status = status;
            t.clone()
        }))
    }

    async fn delete_by_id_and_owner(&self, id: i64, owner_id: i64) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().expect("task store lock poisoned");

        let before = inner.rows.len();
        inner.rows.retain(|t| !(t.id == id && t.owner_id == owner_id));

        Ok((before - inner.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str, description: &str, owner_id: i64) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Open,
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_user_insert_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();

        let alice = store
            .insert(NewUser {
                username: "alice".to_string(),
                password_hash: "h1".to_string(),
                salt: "s1".to_string(),
            })
            .await
            .unwrap();
        let bob = store
            .insert(NewUser {
                username: "bob".to_string(),
                password_hash: "h2".to_string(),
                salt: "s2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
    }

    #[tokio::test]
    async fn test_user_duplicate_username_is_unique_violation() {
        let store = InMemoryUserStore::new();

        let user = NewUser {
            username: "alice".to_string(),
            password_hash: "h".to_string(),
            salt: "s".to_string(),
        };
        store.insert(user.clone()).await.unwrap();

        let result = store.insert(user).await;
        assert!(matches!(result, Err(StoreError::UniqueViolation)));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let store = InMemoryUserStore::new();
        store
            .insert(NewUser {
                username: "alice".to_string(),
                password_hash: "h".to_string(),
                salt: "s".to_string(),
            })
            .await
            .unwrap();

        assert!(store.find_by_username("alice").await.unwrap().is_some());
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_task_owner_scoping() {
        let store = InMemoryTaskStore::new();

        let task = store.insert(new_task("buy milk", "2%", 1)).await.unwrap();

        // Owner sees it, others do not
        assert!(store
            .find_by_id_and_owner(task.id, 1)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_id_and_owner(task.id, 2)
            .await
            .unwrap()
            .is_none());

        // Foreign delete affects nothing
        assert_eq!(store.delete_by_id_and_owner(task.id, 2).await.unwrap(), 0);
        assert_eq!(store.delete_by_id_and_owner(task.id, 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_ordering() {
        let store = InMemoryTaskStore::new();

        let groceries = store
            .insert(new_task("Groceries", "buy milk and eggs", 1))
            .await
            .unwrap();
        let laundry = store
            .insert(new_task("Laundry", "whites only", 1))
            .await
            .unwrap();
        store
            .insert(new_task("Other user's", "not visible", 2))
            .await
            .unwrap();
        store
            .update_status(laundry.id, 1, TaskStatus::Done)
            .await
            .unwrap();

        // Unfiltered: owner's tasks in id order
        let all = store
            .list_by_owner(1, &TaskFilter::default())
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![groceries.id, laundry.id]
        );

        // Status filter
        let done = store
            .list_by_owner(
                1,
                &TaskFilter {
                    status: Some(TaskStatus::Done),
                    search: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, laundry.id);

        // Case-insensitive search over title and description
        let milk = store
            .list_by_owner(
                1,
                &TaskFilter {
                    status: None,
                    search: Some("MILK".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].id, groceries.id);

        // Both filters AND-ed
        let none = store
            .list_by_owner(
                1,
                &TaskFilter {
                    status: Some(TaskStatus::Done),
                    search: Some("milk".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_is_owner_scoped() {
        let store = InMemoryTaskStore::new();
        let task = store.insert(new_task("buy milk", "2%", 1)).await.unwrap();

        let updated = store
            .update_status(task.id, 2, TaskStatus::Done)
            .await
            .unwrap();
        assert!(updated.is_none());

        let updated = store
            .update_status(task.id, 1, TaskStatus::Done)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
    }
}
