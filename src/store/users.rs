use crate::{
    error::AppError,
    models::{NewUser, User},
};
use sqlx::SqlitePool;

/// Credential store backed by the `Uzytkownicy` table.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT Id, Username, PasswordHash, Rola FROM Uzytkownicy WHERE Username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn exists(&self, username: &str) -> Result<bool, AppError> {
        let (matches,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Uzytkownicy WHERE Username = ?")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(matches > 0)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Uzytkownicy")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a user and returns it with its assigned id.
    ///
    /// The row is only written when the table is empty or `caller_is_admin`
    /// holds, and the role is `Admin` exactly when the table was empty. Both
    /// checks run inside the insert statement, so concurrent first
    /// registrations cannot both become administrators. Returns `None` when
    /// the condition rejected the insert.
    pub async fn insert(
        &self,
        user: &NewUser,
        caller_is_admin: bool,
    ) -> Result<Option<User>, AppError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO Uzytkownicy (Username, PasswordHash, Rola)
             SELECT ?, ?, CASE WHEN EXISTS (SELECT 1 FROM Uzytkownicy) THEN 'User' ELSE 'Admin' END
             WHERE ? OR NOT EXISTS (SELECT 1 FROM Uzytkownicy)
             RETURNING Id, Username, PasswordHash, Rola",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(caller_is_admin)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, error::AppError, models::Role};

    async fn store() -> UserStore {
        UserStore::new(db::connect("sqlite::memory:").await.unwrap())
    }

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password_hash: format!("hash-of-{}", name),
        }
    }

    #[actix_rt::test]
    async fn test_first_insert_is_admin() {
        let users = store().await;
        assert_eq!(users.count_all().await.unwrap(), 0);

        let alice = users.insert(&new_user("alice"), false).await.unwrap().unwrap();
        assert_eq!(alice.role, Role::Admin);
        assert_eq!(alice.username, "alice");
        assert!(alice.id > 0);
        assert_eq!(users.count_all().await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn test_later_insert_requires_admin_caller() {
        let users = store().await;
        users.insert(&new_user("alice"), false).await.unwrap();

        assert!(users.insert(&new_user("bob"), false).await.unwrap().is_none());
        assert!(!users.exists("bob").await.unwrap());

        let bob = users.insert(&new_user("bob"), true).await.unwrap().unwrap();
        assert_eq!(bob.role, Role::User);
    }

    #[actix_rt::test]
    async fn test_find_and_exists() {
        let users = store().await;
        assert!(users.find_by_username("alice").await.unwrap().is_none());
        assert!(!users.exists("alice").await.unwrap());

        users.insert(&new_user("alice"), false).await.unwrap();

        let found = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash-of-alice");
        assert!(users.exists("alice").await.unwrap());
    }

    #[actix_rt::test]
    async fn test_duplicate_username_is_conflict() {
        let users = store().await;
        users.insert(&new_user("alice"), false).await.unwrap();

        match users.insert(&new_user("alice"), true).await {
            Err(AppError::Conflict(_)) => {}
            other => panic!("expected conflict, got {:?}", other),
        }
    }
}
