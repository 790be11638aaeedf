//! Project management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Project, ProjectStatus};
use shared::validation::validate_project_number;

/// Project service for managing building projects
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

/// Database row for a project
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    number: String,
    name: String,
    dealer_id: Option<Uuid>,
    factory_id: Option<Uuid>,
    status: String,
    contract_value: Option<Decimal>,
    production_start: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            number: row.number,
            name: row.name,
            dealer_id: row.dealer_id,
            factory_id: row.factory_id,
            status: ProjectStatus::from_str(&row.status).unwrap_or(ProjectStatus::Quoting),
            contract_value: row.contract_value,
            production_start: row.production_start,
            delivery_date: row.delivery_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectInput {
    pub number: String,
    pub name: String,
    pub dealer_id: Option<Uuid>,
    pub factory_id: Option<Uuid>,
    pub contract_value: Option<Decimal>,
    pub production_start: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
}

/// Input for updating a project
#[derive(Debug, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub dealer_id: Option<Uuid>,
    pub factory_id: Option<Uuid>,
    pub status: Option<String>,
    pub contract_value: Option<Decimal>,
    pub production_start: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
}

/// Filters for listing projects
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub factory_id: Option<Uuid>,
    pub dealer_id: Option<Uuid>,
    /// When true, only quoting/contracted/in_production projects
    pub active_only: Option<bool>,
}

impl ProjectService {
    /// Create a new ProjectService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List projects with optional filters, newest first
    pub async fn list_projects(&self, filter: ProjectFilter) -> AppResult<Vec<Project>> {
        if let Some(ref status) = filter.status {
            if ProjectStatus::from_str(status).is_none() {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: "Invalid project status".to_string(),
                });
            }
        }

        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, number, name, dealer_id, factory_id, status, contract_value,
                   production_start, delivery_date, created_at, updated_at
            FROM projects
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR factory_id = $2)
              AND ($3::uuid IS NULL OR dealer_id = $3)
              AND ($4::bool IS NOT TRUE OR status NOT IN ('delivered', 'closed'))
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filter.status)
        .bind(filter.factory_id)
        .bind(filter.dealer_id)
        .bind(filter.active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Get a project by ID
    pub async fn get_project(&self, project_id: Uuid) -> AppResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, number, name, dealer_id, factory_id, status, contract_value,
                   production_start, delivery_date, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(row.into())
    }

    /// Create a new project
    pub async fn create_project(&self, input: CreateProjectInput) -> AppResult<Project> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Project name cannot be empty".to_string(),
            });
        }

        if let Err(msg) = validate_project_number(&input.number) {
            return Err(AppError::Validation {
                field: "number".to_string(),
                message: msg.to_string(),
            });
        }

        // Project numbers are the human-facing key and must be unique
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE number = $1")
                .bind(&input.number)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("number".to_string()));
        }

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (number, name, dealer_id, factory_id, status, contract_value,
                                  production_start, delivery_date)
            VALUES ($1, $2, $3, $4, 'quoting', $5, $6, $7)
            RETURNING id, number, name, dealer_id, factory_id, status, contract_value,
                      production_start, delivery_date, created_at, updated_at
            "#,
        )
        .bind(&input.number)
        .bind(&input.name)
        .bind(input.dealer_id)
        .bind(input.factory_id)
        .bind(input.contract_value)
        .bind(input.production_start)
        .bind(input.delivery_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a project
    pub async fn update_project(
        &self,
        project_id: Uuid,
        input: UpdateProjectInput,
    ) -> AppResult<Project> {
        let existing = self.get_project(project_id).await?;

        // Validate status if provided
        let status = match input.status {
            Some(ref s) => ProjectStatus::from_str(s).ok_or_else(|| AppError::Validation {
                field: "status".to_string(),
                message: "Invalid project status".to_string(),
            })?,
            None => existing.status,
        };

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Project name cannot be empty".to_string(),
            });
        }

        let dealer_id = input.dealer_id.or(existing.dealer_id);
        let factory_id = input.factory_id.or(existing.factory_id);
        let contract_value = input.contract_value.or(existing.contract_value);
        let production_start = input.production_start.or(existing.production_start);
        let delivery_date = input.delivery_date.or(existing.delivery_date);

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = $1, dealer_id = $2, factory_id = $3, status = $4, contract_value = $5,
                production_start = $6, delivery_date = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING id, number, name, dealer_id, factory_id, status, contract_value,
                      production_start, delivery_date, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(dealer_id)
        .bind(factory_id)
        .bind(status.as_str())
        .bind(contract_value)
        .bind(production_start)
        .bind(delivery_date)
        .bind(project_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a project and its dependent records
    pub async fn delete_project(&self, project_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Attachments carry no FK to their parents; clear them for the
        // project and everything under it before the cascades run
        sqlx::query(
            r#"
            DELETE FROM file_attachments
            WHERE (parent_kind = 'project' AND parent_id = $1)
               OR (parent_kind = 'task'
                   AND parent_id IN (SELECT id FROM tasks WHERE project_id = $1))
               OR (parent_kind = 'submittal'
                   AND parent_id IN (SELECT id FROM submittals WHERE project_id = $1))
               OR (parent_kind = 'rfi'
                   AND parent_id IN (SELECT id FROM rfis WHERE project_id = $1))
            "#,
        )
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }
}
