//! Department management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Department;
use shared::validation::validate_email;

/// Department service for routing work to the right desk
#[derive(Clone)]
pub struct DepartmentService {
    db: PgPool,
}

/// Database row for department data
#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    id: Uuid,
    name: String,
    email_alias: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            name: row.name,
            email_alias: row.email_alias,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a department
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentInput {
    pub name: String,
    pub email_alias: Option<String>,
}

impl DepartmentService {
    /// Create a new DepartmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all departments, sorted by name
    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, email_alias, created_at
            FROM departments
            ORDER BY LOWER(name) ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Department::from).collect())
    }

    /// Create a new department
    pub async fn create_department(&self, input: CreateDepartmentInput) -> AppResult<Department> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Department name cannot be empty".to_string(),
            });
        }

        if let Some(ref alias) = input.email_alias {
            if let Err(msg) = validate_email(alias) {
                return Err(AppError::Validation {
                    field: "email_alias".to_string(),
                    message: msg.to_string(),
                });
            }
        }

        // Check for duplicate name
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM departments WHERE LOWER(name) = LOWER($1)",
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            INSERT INTO departments (name, email_alias)
            VALUES ($1, $2)
            RETURNING id, name, email_alias, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email_alias)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a department
    pub async fn delete_department(&self, department_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(department_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Department".to_string()));
        }

        Ok(())
    }
}
