use crate::{
    error::AppError,
    models::{NewTask, PageWindow, Task},
};
use sqlx::SqlitePool;

const TASK_COLUMNS: &str = "Id, IdUzytkownik, Status, Tytul, Tresc, CzyWykonane, DataUtworzenia";

/// Task store backed by the `Zadania` table.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tasks of one owner, newest (highest id) first.
    ///
    /// Without a window the whole filtered set is returned. SQLite needs a
    /// `LIMIT` before `OFFSET`, and `LIMIT -1` means no limit.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        only_pending: bool,
        window: Option<PageWindow>,
    ) -> Result<Vec<Task>, AppError> {
        let PageWindow { skip, take } = window.unwrap_or(PageWindow { skip: 0, take: -1 });
        let sql = format!(
            "SELECT {} FROM Zadania
             WHERE IdUzytkownik = ? AND (? = 0 OR CzyWykonane = 0)
             ORDER BY Id DESC
             LIMIT ? OFFSET ?",
            TASK_COLUMNS
        );

        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(only_pending)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    /// Looks a task up by id alone; ownership is not considered.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM Zadania WHERE Id = ?", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn insert(&self, task: &NewTask) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO Zadania (IdUzytkownik, Status, Tytul, Tresc, CzyWykonane, DataUtworzenia)
             VALUES (?, ?, ?, ?, 0, ?)
             RETURNING {}",
            TASK_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Task>(&sql)
            .bind(task.owner_id)
            .bind(&task.status)
            .bind(&task.title)
            .bind(&task.body)
            .bind(task.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    /// Removes a task and returns the deleted row, or `None` if it was absent.
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let sql = format!("DELETE FROM Zadania WHERE Id = ? RETURNING {}", TASK_COLUMNS);
        let deleted = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }

    /// Overwrites every column of the row with `task.id`.
    ///
    /// Returns `false` when no row was written.
    pub async fn replace(&self, task: &Task) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE Zadania
             SET IdUzytkownik = ?, Status = ?, Tytul = ?, Tresc = ?, CzyWykonane = ?, DataUtworzenia = ?
             WHERE Id = ?",
        )
        .bind(task.owner_id)
        .bind(&task.status)
        .bind(&task.title)
        .bind(&task.body)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
