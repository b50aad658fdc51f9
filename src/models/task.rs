use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a task as stored in the `Zadania` table and returned by the API.
///
/// The owner id is never serialized; clients only ever see their own id
/// through the token they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct Task {
    /// Auto-assigned identifier.
    pub id: i64,
    /// Identifier of the owning user.
    #[serde(skip)]
    #[sqlx(rename = "IdUzytkownik")]
    pub owner_id: i64,
    /// Free-form status label.
    pub status: String,
    #[serde(rename = "tytul")]
    #[sqlx(rename = "Tytul")]
    pub title: String,
    #[serde(rename = "tresc")]
    #[sqlx(rename = "Tresc")]
    pub body: String,
    /// Completion flag. `false` for freshly created tasks.
    #[serde(rename = "czyWykonane")]
    #[sqlx(rename = "CzyWykonane")]
    pub completed: bool,
    /// Set by the server when the task is created.
    #[serde(rename = "dataUtworzenia")]
    #[sqlx(rename = "DataUtworzenia")]
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /zadania`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(rename = "tytul", default)]
    pub title: String,
    #[serde(rename = "tresc", default)]
    pub body: String,
    #[serde(default)]
    pub status: String,
}

/// A task about to be inserted; the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: i64,
    pub status: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// New tasks always start incomplete and are stamped with the current time.
    pub fn new(input: TaskInput, owner_id: i64) -> Self {
        Self {
            owner_id,
            status: input.status,
            title: input.title,
            body: input.body,
            created_at: Utc::now(),
        }
    }
}

/// Request body for `PUT /zadania/{id}`: a full task including its id.
///
/// Any owner information in the body is ignored; the caller becomes the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReplacement {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "tytul", default)]
    pub title: String,
    #[serde(rename = "tresc", default)]
    pub body: String,
    #[serde(rename = "czyWykonane", default)]
    pub completed: bool,
    #[serde(rename = "dataUtworzenia", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Query parameters of `GET /zadania`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskQuery {
    /// Page size; `0` or less returns everything.
    pub limit: i64,
    /// 1-based page number.
    pub page: i64,
    /// Only return tasks that are not completed.
    pub only_pending: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            limit: 0,
            page: 1,
            only_pending: false,
        }
    }
}

/// A resolved window over the ordered task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub take: i64,
}

impl TaskQuery {
    /// Turns `limit`/`page` into a skip/take window.
    ///
    /// Returns `None` when the listing is unpaginated (`limit <= 0`). Pages
    /// below 1 are treated as page 1 and the skip count saturates.
    pub fn window(&self) -> Option<PageWindow> {
        if self.limit <= 0 {
            return None;
        }
        let page = self.page.max(1);
        Some(PageWindow {
            skip: (page - 1).saturating_mul(self.limit),
            take: self.limit,
        })
    }
}

impl Task {
    /// Builds a task owned by `owner_id` from a replacement body.
    pub fn from_replacement(replacement: TaskReplacement, owner_id: i64) -> Self {
        Self {
            id: replacement.id,
            owner_id,
            status: replacement.status,
            title: replacement.title,
            body: replacement.body,
            completed: replacement.completed,
            created_at: replacement.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_wire_format() {
        let task = Task {
            id: 3,
            owner_id: 42,
            status: "open".to_string(),
            title: "T".to_string(),
            body: "B".to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["tytul"], "T");
        assert_eq!(json["tresc"], "B");
        assert_eq!(json["status"], "open");
        assert_eq!(json["czyWykonane"], false);
        assert!(json["dataUtworzenia"].is_string());
        assert!(json.get("owner_id").is_none());
        assert!(json.get("idUzytkownik").is_none());
    }

    #[test]
    fn test_replacement_defaults() {
        let replacement: TaskReplacement =
            serde_json::from_str(r#"{"id": 5, "tytul": "x", "tresc": "y", "status": "done"}"#)
                .unwrap();
        assert_eq!(replacement.id, 5);
        assert!(!replacement.completed);

        let task = Task::from_replacement(replacement, 9);
        assert_eq!(task.owner_id, 9);
        assert_eq!(task.title, "x");
    }

    #[test]
    fn test_query_defaults() {
        let query: TaskQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 0);
        assert_eq!(query.page, 1);
        assert!(!query.only_pending);
    }

    #[test]
    fn test_window_unpaginated() {
        let query = TaskQuery { limit: 0, ..TaskQuery::default() };
        assert_eq!(query.window(), None);

        let query = TaskQuery { limit: -5, page: 3, only_pending: false };
        assert_eq!(query.window(), None);
    }

    #[test]
    fn test_window_pages() {
        let window = |page| TaskQuery { limit: 10, page, only_pending: false }.window();

        assert_eq!(window(1), Some(PageWindow { skip: 0, take: 10 }));
        assert_eq!(window(2), Some(PageWindow { skip: 10, take: 10 }));
        assert_eq!(window(3), Some(PageWindow { skip: 20, take: 10 }));
        // Pages below 1 clamp to the first page.
        assert_eq!(window(0), Some(PageWindow { skip: 0, take: 10 }));
        assert_eq!(window(-4), Some(PageWindow { skip: 0, take: 10 }));
    }

    #[test]
    fn test_window_saturates() {
        let query = TaskQuery { limit: i64::MAX, page: 3, only_pending: false };
        assert_eq!(query.window().unwrap().skip, i64::MAX);
    }
}
