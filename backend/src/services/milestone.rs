//! Project milestone service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Milestone;

/// Milestone service for project schedule entries
#[derive(Clone)]
pub struct MilestoneService {
    db: PgPool,
}

/// Input for creating a milestone
#[derive(Debug, Deserialize)]
pub struct CreateMilestoneInput {
    pub name: String,
    pub date: NaiveDate,
}

/// Input for updating a milestone
#[derive(Debug, Deserialize)]
pub struct UpdateMilestoneInput {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

impl MilestoneService {
    /// Create a new MilestoneService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List milestones for a project, earliest first
    pub async fn list_milestones(&self, project_id: Uuid) -> AppResult<Vec<Milestone>> {
        let rows = sqlx::query_as::<
            _,
            (Uuid, Uuid, String, NaiveDate, bool, DateTime<Utc>, DateTime<Utc>),
        >(
            r#"
            SELECT id, project_id, name, date, completed, created_at, updated_at
            FROM milestones
            WHERE project_id = $1
            ORDER BY date, LOWER(name)
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Milestone {
                id: r.0,
                project_id: r.1,
                name: r.2,
                date: r.3,
                completed: r.4,
                created_at: r.5,
                updated_at: r.6,
            })
            .collect())
    }

    /// Create a milestone on a project
    pub async fn create_milestone(
        &self,
        project_id: Uuid,
        input: CreateMilestoneInput,
    ) -> AppResult<Milestone> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Milestone name cannot be empty".to_string(),
            });
        }

        // Parent project must exist
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let row = sqlx::query_as::<
            _,
            (Uuid, Uuid, String, NaiveDate, bool, DateTime<Utc>, DateTime<Utc>),
        >(
            r#"
            INSERT INTO milestones (project_id, name, date)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, name, date, completed, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(&input.name)
        .bind(input.date)
        .fetch_one(&self.db)
        .await?;

        Ok(Milestone {
            id: row.0,
            project_id: row.1,
            name: row.2,
            date: row.3,
            completed: row.4,
            created_at: row.5,
            updated_at: row.6,
        })
    }

    /// Update a milestone
    pub async fn update_milestone(
        &self,
        milestone_id: Uuid,
        input: UpdateMilestoneInput,
    ) -> AppResult<Milestone> {
        let existing = sqlx::query_as::<_, (String, NaiveDate, bool)>(
            "SELECT name, date, completed FROM milestones WHERE id = $1",
        )
        .bind(milestone_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Milestone".to_string()))?;

        let name = input.name.unwrap_or(existing.0);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Milestone name cannot be empty".to_string(),
            });
        }
        let date = input.date.unwrap_or(existing.1);
        let completed = input.completed.unwrap_or(existing.2);

        let row = sqlx::query_as::<
            _,
            (Uuid, Uuid, String, NaiveDate, bool, DateTime<Utc>, DateTime<Utc>),
        >(
            r#"
            UPDATE milestones
            SET name = $1, date = $2, completed = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, project_id, name, date, completed, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(date)
        .bind(completed)
        .bind(milestone_id)
        .fetch_one(&self.db)
        .await?;

        Ok(Milestone {
            id: row.0,
            project_id: row.1,
            name: row.2,
            date: row.3,
            completed: row.4,
            created_at: row.5,
            updated_at: row.6,
        })
    }

    /// Mark a milestone completed
    pub async fn complete_milestone(&self, milestone_id: Uuid) -> AppResult<Milestone> {
        self.update_milestone(
            milestone_id,
            UpdateMilestoneInput {
                name: None,
                date: None,
                completed: Some(true),
            },
        )
        .await
    }

    /// Delete a milestone
    pub async fn delete_milestone(&self, milestone_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(milestone_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Milestone".to_string()));
        }

        Ok(())
    }
}
