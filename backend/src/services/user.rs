//! User directory service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::User;

/// User directory service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Database row for user data
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    title: Option<String>,
    phone: Option<String>,
    department: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            name: row.name,
            title: row.title,
            phone: row.phone,
            department: row.department,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all user accounts, sorted by name
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, title, phone, department, created_at, updated_at
            FROM users
            ORDER BY LOWER(name) ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
