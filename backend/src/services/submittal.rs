//! Submittal tracking service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Submittal, SubmittalStatus};
use shared::validation::validate_spec_section;

/// Submittal service for approval packages
#[derive(Clone)]
pub struct SubmittalService {
    db: PgPool,
}

/// Database row for a submittal
#[derive(Debug, sqlx::FromRow)]
struct SubmittalRow {
    id: Uuid,
    project_id: Uuid,
    number: String,
    title: String,
    spec_section: Option<String>,
    status: String,
    revision: i32,
    due_date: Option<NaiveDate>,
    sent_date: Option<NaiveDate>,
    returned_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubmittalRow> for Submittal {
    fn from(row: SubmittalRow) -> Self {
        Submittal {
            id: row.id,
            project_id: row.project_id,
            number: row.number,
            title: row.title,
            spec_section: row.spec_section,
            status: SubmittalStatus::from_str(&row.status).unwrap_or(SubmittalStatus::Draft),
            revision: row.revision,
            due_date: row.due_date,
            sent_date: row.sent_date,
            returned_date: row.returned_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a submittal
#[derive(Debug, Deserialize)]
pub struct CreateSubmittalInput {
    pub project_id: Uuid,
    pub title: String,
    pub spec_section: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Input for updating a submittal
#[derive(Debug, Deserialize)]
pub struct UpdateSubmittalInput {
    pub title: Option<String>,
    pub spec_section: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub sent_date: Option<NaiveDate>,
    pub returned_date: Option<NaiveDate>,
}

/// Filters for listing submittals
#[derive(Debug, Default, Deserialize)]
pub struct SubmittalFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<String>,
}

impl SubmittalService {
    /// Create a new SubmittalService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List submittals with optional filters
    pub async fn list_submittals(&self, filter: SubmittalFilter) -> AppResult<Vec<Submittal>> {
        if let Some(ref status) = filter.status {
            if SubmittalStatus::from_str(status).is_none() {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: "Invalid submittal status".to_string(),
                });
            }
        }

        let rows = sqlx::query_as::<_, SubmittalRow>(
            r#"
            SELECT id, project_id, number, title, spec_section, status, revision,
                   due_date, sent_date, returned_date, created_at, updated_at
            FROM submittals
            WHERE ($1::uuid IS NULL OR project_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY number
            "#,
        )
        .bind(filter.project_id)
        .bind(&filter.status)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Submittal::from).collect())
    }

    /// Get a submittal by ID
    pub async fn get_submittal(&self, submittal_id: Uuid) -> AppResult<Submittal> {
        let row = sqlx::query_as::<_, SubmittalRow>(
            r#"
            SELECT id, project_id, number, title, spec_section, status, revision,
                   due_date, sent_date, returned_date, created_at, updated_at
            FROM submittals
            WHERE id = $1
            "#,
        )
        .bind(submittal_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submittal".to_string()))?;

        Ok(row.into())
    }

    /// Create a new submittal at revision 0 with a per-project sequence number
    pub async fn create_submittal(&self, input: CreateSubmittalInput) -> AppResult<Submittal> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                message: "Submittal title cannot be empty".to_string(),
            });
        }

        if let Some(ref section) = input.spec_section {
            if let Err(msg) = validate_spec_section(section) {
                return Err(AppError::Validation {
                    field: "spec_section".to_string(),
                    message: msg.to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE id = $1")
            .bind(input.project_id)
            .fetch_one(&mut *tx)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        // Next sequence within the project
        let sequence = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) + 1 FROM submittals WHERE project_id = $1",
        )
        .bind(input.project_id)
        .fetch_one(&mut *tx)
        .await?;

        let number = format!("SUB-{:03}", sequence);

        let row = sqlx::query_as::<_, SubmittalRow>(
            r#"
            INSERT INTO submittals (project_id, number, title, spec_section, status, revision, due_date)
            VALUES ($1, $2, $3, $4, 'draft', 0, $5)
            RETURNING id, project_id, number, title, spec_section, status, revision,
                      due_date, sent_date, returned_date, created_at, updated_at
            "#,
        )
        .bind(input.project_id)
        .bind(&number)
        .bind(&input.title)
        .bind(&input.spec_section)
        .bind(input.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update a submittal
    pub async fn update_submittal(
        &self,
        submittal_id: Uuid,
        input: UpdateSubmittalInput,
    ) -> AppResult<Submittal> {
        let existing = self.get_submittal(submittal_id).await?;

        let status = match input.status {
            Some(ref s) => SubmittalStatus::from_str(s).ok_or_else(|| AppError::Validation {
                field: "status".to_string(),
                message: "Invalid submittal status".to_string(),
            })?,
            None => existing.status,
        };

        // Reopening a returned submittal goes through resubmit, which bumps
        // the revision; a plain status edit back to submitted would lose that
        if existing.status.can_resubmit() && status == SubmittalStatus::Submitted {
            return Err(AppError::InvalidStatusTransition(
                "Returned submittals must be resubmitted, not edited back to submitted"
                    .to_string(),
            ));
        }

        if let Some(ref section) = input.spec_section {
            if let Err(msg) = validate_spec_section(section) {
                return Err(AppError::Validation {
                    field: "spec_section".to_string(),
                    message: msg.to_string(),
                });
            }
        }

        let title = input.title.unwrap_or(existing.title);
        if title.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                message: "Submittal title cannot be empty".to_string(),
            });
        }

        let spec_section = input.spec_section.or(existing.spec_section);
        let due_date = input.due_date.or(existing.due_date);
        let sent_date = input.sent_date.or(existing.sent_date);
        let returned_date = input.returned_date.or(existing.returned_date);

        let row = sqlx::query_as::<_, SubmittalRow>(
            r#"
            UPDATE submittals
            SET title = $1, spec_section = $2, status = $3, due_date = $4,
                sent_date = $5, returned_date = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING id, project_id, number, title, spec_section, status, revision,
                      due_date, sent_date, returned_date, created_at, updated_at
            "#,
        )
        .bind(&title)
        .bind(&spec_section)
        .bind(status.as_str())
        .bind(due_date)
        .bind(sent_date)
        .bind(returned_date)
        .bind(submittal_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Resubmit a returned submittal
    ///
    /// Allowed only from revise_resubmit or rejected. Increments the
    /// revision, resets the status to submitted, stamps the sent date, and
    /// clears the returned date.
    pub async fn resubmit_submittal(
        &self,
        submittal_id: Uuid,
        sent_date: NaiveDate,
    ) -> AppResult<Submittal> {
        let existing = self.get_submittal(submittal_id).await?;

        if !existing.status.can_resubmit() {
            return Err(AppError::InvalidStatusTransition(format!(
                "Cannot resubmit a submittal in status '{}'",
                existing.status.as_str()
            )));
        }

        let row = sqlx::query_as::<_, SubmittalRow>(
            r#"
            UPDATE submittals
            SET status = 'submitted', revision = revision + 1, sent_date = $1,
                returned_date = NULL, updated_at = NOW()
            WHERE id = $2
            RETURNING id, project_id, number, title, spec_section, status, revision,
                      due_date, sent_date, returned_date, created_at, updated_at
            "#,
        )
        .bind(sent_date)
        .bind(submittal_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a submittal and its attachments
    pub async fn delete_submittal(&self, submittal_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "DELETE FROM file_attachments WHERE parent_kind = 'submittal' AND parent_id = $1",
        )
        .bind(submittal_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM submittals WHERE id = $1")
            .bind(submittal_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Submittal".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }
}
