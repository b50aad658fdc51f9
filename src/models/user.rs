use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a user account.
/// Stored as text in the `Rola` column and carried in the token claims.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum Role {
    /// The first account ever registered. May register further users.
    Admin,
    /// Any account registered by an administrator.
    User,
}

/// A user row from the `Uzytkownicy` table.
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    #[sqlx(rename = "Rola")]
    pub role: Role,
}

/// A user about to be inserted; the role is decided by the store.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        assert_eq!(serde_json::from_str::<Role>("\"User\"").unwrap(), Role::User);
    }
}
