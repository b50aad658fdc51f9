use log::error;

use crate::{
    error::AppError,
    models::{NewTask, Task, TaskInput, TaskQuery, TaskReplacement},
    store::TaskStore,
};

/// Task operations on behalf of an authenticated caller.
///
/// `create` and `update` force the caller to be the owner. `get_by_id` and
/// `delete_by_id` act on any task id without checking ownership.
#[derive(Clone)]
pub struct TaskService {
    tasks: TaskStore,
}

impl TaskService {
    pub fn new(tasks: TaskStore) -> Self {
        Self { tasks }
    }

    /// The caller's tasks, newest first, optionally pending only and paginated.
    pub async fn list(&self, caller_id: i64, query: TaskQuery) -> Result<Vec<Task>, AppError> {
        self.tasks
            .list_by_owner(caller_id, query.only_pending, query.window())
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Task, AppError> {
        self.tasks.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, caller_id: i64, input: TaskInput) -> Result<Task, AppError> {
        self.tasks.insert(&NewTask::new(input, caller_id)).await
    }

    /// Deletes a task and returns it.
    pub async fn delete_by_id(&self, id: i64) -> Result<Task, AppError> {
        self.tasks.delete_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Replaces the task at `id` with `replacement`, owned by `caller_id`.
    pub async fn update(
        &self,
        id: i64,
        replacement: TaskReplacement,
        caller_id: i64,
    ) -> Result<(), AppError> {
        if replacement.id != id {
            return Err(AppError::BadRequest(
                "The id in the path and in the body do not match".into(),
            ));
        }

        let task = Task::from_replacement(replacement, caller_id);
        if self.tasks.replace(&task).await? {
            return Ok(());
        }

        if self.tasks.get_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }
        error!("Update of task {} wrote no row although the task exists", id);
        Err(AppError::Fatal(format!("Task {} could not be updated", id)))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Task with id {} not found", id))
}
