//! In-memory task storage
//!
//! The production store for this service: a single `RwLock` over the task
//! map, which also gives the one-writer-at-a-time discipline the domain
//! assumes. Listing order is insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::uuid;

use super::model::{Task, TaskStatus};
use super::repository::TaskRepository;
use crate::id::{TaskId, UserId};
use crate::Result;

#[derive(Default)]
struct Inner {
    tasks: HashMap<TaskId, Task>,
    /// Ids in first-insertion order, so listings stay stable
    order: Vec<TaskId>,
}

/// In-memory task store
pub struct InMemoryTaskStore {
    inner: RwLock<Inner>,
}

impl InMemoryTaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Create a store pre-populated with the fixed demo data set
    ///
    /// Seeding happens right here at construction time; there is no hidden
    /// lazily-initialized state behind it.
    pub fn seeded() -> Self {
        let user_1 = UserId::from(uuid!("a7a4b8f0-5c1a-4f7e-8d3b-9e6c1b9a2e8d"));
        let user_2 = UserId::from(uuid!("f3e9c1a8-6b2d-4c8e-9a1d-0b3a5e7d1c9f"));

        let seed = [
            Task::new(
                TaskId::from(uuid!("e1d8c5b4-7a3f-4b9d-8e5c-1a9b3d7f0e2a")),
                "Design Architecture",
                Some("Define layers and components".to_string()),
                TaskStatus::Done,
                Some(user_1),
            ),
            Task::new(
                TaskId::from(uuid!("f0a1b7e6-5d3c-4a8b-9e1d-7c2f5a8b3d1e")),
                "Implement Controller",
                Some("Create TaskController actions".to_string()),
                TaskStatus::InProgress,
                Some(user_1),
            ),
            Task::new(
                TaskId::from(uuid!("c1b2e8f7-6e4d-4b9c-8f2e-8d3a6b9c4e2f")),
                "Implement Service",
                Some("Create TaskService logic".to_string()),
                TaskStatus::Todo,
                Some(user_2),
            ),
            Task::new(
                TaskId::from(uuid!("d2c3f9a8-7f5e-4cad-8a3f-9e4b7cad5f3a")),
                "Write Repository Tests",
                Some("Add tests for repository".to_string()),
                TaskStatus::Todo,
                None,
            ),
            Task::new(
                TaskId::from(uuid!("e3d4a0b9-8a6f-4dbe-9b4a-0f5c8dbe6a4b")),
                "Refactor Validation",
                Some("Improve DTO validation".to_string()),
                TaskStatus::InProgress,
                Some(user_2),
            ),
        ];

        let mut inner = Inner::default();
        for task in seed {
            inner.order.push(task.id());
            inner.tasks.insert(task.id(), task);
        }

        Self {
            inner: RwLock::new(inner),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn find_all(
        &self,
        status: Option<TaskStatus>,
        assignee_id: Option<UserId>,
    ) -> Result<Vec<Task>> {
        let inner = self.inner.read().await;
        let tasks = inner
            .order
            .iter()
            .filter_map(|id| inner.tasks.get(id))
            .filter(|task| status.is_none_or(|s| task.status() == s))
            .filter(|task| {
                assignee_id.is_none_or(|user| task.assignee_id().is_some_and(|a| a == user))
            })
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn save(&self, task: &Task) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.tasks.insert(task.id(), task.clone()).is_none() {
            inner.order.push(task.id());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(title: &str, status: TaskStatus, assignee: Option<UserId>) -> Task {
        Task::new(TaskId::generate(), title, None, status, assignee)
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let store = InMemoryTaskStore::new();
        let task = make_task("Task", TaskStatus::Todo, None);
        store.save(&task).await.unwrap();

        let found = store.find_by_id(task.id()).await.unwrap();
        assert_eq!(found.unwrap().title(), "Task");

        let missing = store.find_by_id(TaskId::generate()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_is_an_upsert() {
        let store = InMemoryTaskStore::new();
        let mut task = make_task("Before", TaskStatus::Todo, None);
        store.save(&task).await.unwrap();

        task.update_details("After", None);
        store.save(&task).await.unwrap();

        let all = store.find_all(None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title(), "After");
    }

    #[tokio::test]
    async fn test_caller_mutation_does_not_leak_into_store() {
        let store = InMemoryTaskStore::new();
        let task = make_task("Stored", TaskStatus::Todo, None);
        store.save(&task).await.unwrap();

        let mut copy = store.find_by_id(task.id()).await.unwrap().unwrap();
        copy.update_details("Mutated copy", None);

        let stored = store.find_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Stored");
    }

    #[tokio::test]
    async fn test_find_all_applies_both_filters() {
        let store = InMemoryTaskStore::new();
        let user = UserId::generate();
        let other = UserId::generate();

        store
            .save(&make_task("todo/user", TaskStatus::Todo, Some(user)))
            .await
            .unwrap();
        store
            .save(&make_task("done/user", TaskStatus::Done, Some(user)))
            .await
            .unwrap();
        store
            .save(&make_task("todo/other", TaskStatus::Todo, Some(other)))
            .await
            .unwrap();
        store
            .save(&make_task("todo/unassigned", TaskStatus::Todo, None))
            .await
            .unwrap();

        // Both filters: logical AND
        let filtered = store
            .find_all(Some(TaskStatus::Todo), Some(user))
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title(), "todo/user");

        // Status only
        let todos = store.find_all(Some(TaskStatus::Todo), None).await.unwrap();
        assert_eq!(todos.len(), 3);

        // Assignee only
        let users = store.find_all(None, Some(user)).await.unwrap();
        assert_eq!(users.len(), 2);

        // No filters
        let all = store.find_all(None, None).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = InMemoryTaskStore::new();
        let mut first = make_task("first", TaskStatus::Todo, None);
        let second = make_task("second", TaskStatus::Todo, None);
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        // Re-saving must not move a task to the back
        first.update_details("first again", None);
        store.save(&first).await.unwrap();

        let all = store.find_all(None, None).await.unwrap();
        let titles: Vec<&str> = all.iter().map(Task::title).collect();
        assert_eq!(titles, vec!["first again", "second"]);
    }

    #[tokio::test]
    async fn test_seeded_store_contents() {
        let store = InMemoryTaskStore::seeded();
        let all = store.find_all(None, None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].title(), "Design Architecture");
        assert_eq!(all[0].status(), TaskStatus::Done);

        let unassigned: TaskId = "d2c3f9a8-7f5e-4cad-8a3f-9e4b7cad5f3a".parse().unwrap();
        let task = store.find_by_id(unassigned).await.unwrap().unwrap();
        assert!(task.assignee_id().is_none());
    }
}
