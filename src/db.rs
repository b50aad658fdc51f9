use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS Uzytkownicy (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Username TEXT NOT NULL UNIQUE,
        PasswordHash TEXT NOT NULL,
        Rola TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS Zadania (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        IdUzytkownik INTEGER NOT NULL REFERENCES Uzytkownicy (Id) ON DELETE CASCADE,
        Status TEXT NOT NULL,
        Tytul TEXT NOT NULL,
        Tresc TEXT NOT NULL,
        CzyWykonane INTEGER NOT NULL,
        DataUtworzenia TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS IX_Zadania_IdUzytkownik ON Zadania (IdUzytkownik)",
];

/// Opens the pool and makes sure both tables exist.
///
/// In-memory databases live per connection, so they get a single connection
/// that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = pool_options.connect_with(options).await?;

    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_schema_is_idempotent() {
        let pool = connect("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('Uzytkownicy', 'Zadania') ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(
            tables,
            vec![("Uzytkownicy".to_string(),), ("Zadania".to_string(),)]
        );
    }

    #[actix_rt::test]
    async fn test_tasks_cascade_with_owner() {
        let pool = connect("sqlite::memory:").await.unwrap();
        sqlx::query("INSERT INTO Uzytkownicy (Username, PasswordHash, Rola) VALUES ('a', 'h', 'Admin')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO Zadania (IdUzytkownik, Status, Tytul, Tresc, CzyWykonane, DataUtworzenia) VALUES (1, 's', 't', 'b', 0, '2024-01-01T00:00:00Z')")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("DELETE FROM Uzytkownicy WHERE Id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Zadania")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
