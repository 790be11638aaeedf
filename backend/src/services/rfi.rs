//! Request-for-information service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Rfi, RfiStatus};

/// RFI service for question/answer tracking
#[derive(Clone)]
pub struct RfiService {
    db: PgPool,
}

/// Database row for an RFI
#[derive(Debug, sqlx::FromRow)]
struct RfiRow {
    id: Uuid,
    project_id: Uuid,
    number: String,
    subject: String,
    question: String,
    answer: Option<String>,
    status: String,
    due_date: Option<NaiveDate>,
    asked_by: Option<String>,
    answered_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RfiRow> for Rfi {
    fn from(row: RfiRow) -> Self {
        Rfi {
            id: row.id,
            project_id: row.project_id,
            number: row.number,
            subject: row.subject,
            question: row.question,
            answer: row.answer,
            status: RfiStatus::from_str(&row.status).unwrap_or(RfiStatus::Open),
            due_date: row.due_date,
            asked_by: row.asked_by,
            answered_by: row.answered_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating an RFI
#[derive(Debug, Deserialize)]
pub struct CreateRfiInput {
    pub project_id: Uuid,
    pub subject: String,
    pub question: String,
    pub due_date: Option<NaiveDate>,
    pub asked_by: Option<String>,
}

/// Input for updating an RFI
#[derive(Debug, Deserialize)]
pub struct UpdateRfiInput {
    pub subject: Option<String>,
    pub question: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Input for answering an RFI
#[derive(Debug, Deserialize)]
pub struct AnswerRfiInput {
    pub answer: String,
    pub answered_by: Option<String>,
}

/// Filters for listing RFIs
#[derive(Debug, Default, Deserialize)]
pub struct RfiFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<String>,
}

impl RfiService {
    /// Create a new RfiService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List RFIs with optional filters
    pub async fn list_rfis(&self, filter: RfiFilter) -> AppResult<Vec<Rfi>> {
        if let Some(ref status) = filter.status {
            if RfiStatus::from_str(status).is_none() {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: "Invalid RFI status".to_string(),
                });
            }
        }

        let rows = sqlx::query_as::<_, RfiRow>(
            r#"
            SELECT id, project_id, number, subject, question, answer, status,
                   due_date, asked_by, answered_by, created_at, updated_at
            FROM rfis
            WHERE ($1::uuid IS NULL OR project_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY number
            "#,
        )
        .bind(filter.project_id)
        .bind(&filter.status)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Rfi::from).collect())
    }

    /// Get an RFI by ID
    pub async fn get_rfi(&self, rfi_id: Uuid) -> AppResult<Rfi> {
        let row = sqlx::query_as::<_, RfiRow>(
            r#"
            SELECT id, project_id, number, subject, question, answer, status,
                   due_date, asked_by, answered_by, created_at, updated_at
            FROM rfis
            WHERE id = $1
            "#,
        )
        .bind(rfi_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("RFI".to_string()))?;

        Ok(row.into())
    }

    /// Create a new RFI with a per-project sequence number
    pub async fn create_rfi(&self, input: CreateRfiInput) -> AppResult<Rfi> {
        if input.subject.trim().is_empty() {
            return Err(AppError::Validation {
                field: "subject".to_string(),
                message: "RFI subject cannot be empty".to_string(),
            });
        }

        if input.question.trim().is_empty() {
            return Err(AppError::Validation {
                field: "question".to_string(),
                message: "RFI question cannot be empty".to_string(),
            });
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
        let sequence =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) + 1 FROM rfis WHERE project_id = $1")
                .bind(input.project_id)
                .fetch_one(&mut *tx)
                .await?;

        let number = format!("RFI-{:03}", sequence);

        let row = sqlx::query_as::<_, RfiRow>(
            r#"
            INSERT INTO rfis (project_id, number, subject, question, status, due_date, asked_by)
            VALUES ($1, $2, $3, $4, 'open', $5, $6)
            RETURNING id, project_id, number, subject, question, answer, status,
                      due_date, asked_by, answered_by, created_at, updated_at
            "#,
        )
        .bind(input.project_id)
        .bind(&number)
        .bind(&input.subject)
        .bind(&input.question)
        .bind(input.due_date)
        .bind(&input.asked_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update an open RFI's subject, question, or due date
    pub async fn update_rfi(&self, rfi_id: Uuid, input: UpdateRfiInput) -> AppResult<Rfi> {
        let existing = self.get_rfi(rfi_id).await?;

        let subject = input.subject.unwrap_or(existing.subject);
        if subject.trim().is_empty() {
            return Err(AppError::Validation {
                field: "subject".to_string(),
                message: "RFI subject cannot be empty".to_string(),
            });
        }

        let question = input.question.unwrap_or(existing.question);
        let due_date = input.due_date.or(existing.due_date);

        let row = sqlx::query_as::<_, RfiRow>(
            r#"
            UPDATE rfis
            SET subject = $1, question = $2, due_date = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, project_id, number, subject, question, answer, status,
                      due_date, asked_by, answered_by, created_at, updated_at
            "#,
        )
        .bind(&subject)
        .bind(&question)
        .bind(due_date)
        .bind(rfi_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Answer an open RFI
    pub async fn answer_rfi(&self, rfi_id: Uuid, input: AnswerRfiInput) -> AppResult<Rfi> {
        if input.answer.trim().is_empty() {
            return Err(AppError::Validation {
                field: "answer".to_string(),
                message: "Answer cannot be empty".to_string(),
            });
        }

        let existing = self.get_rfi(rfi_id).await?;

        if existing.status != RfiStatus::Open {
            return Err(AppError::InvalidStatusTransition(format!(
                "Cannot answer an RFI in status '{}'",
                existing.status.as_str()
            )));
        }

        let row = sqlx::query_as::<_, RfiRow>(
            r#"
            UPDATE rfis
            SET answer = $1, answered_by = $2, status = 'answered', updated_at = NOW()
            WHERE id = $3
            RETURNING id, project_id, number, subject, question, answer, status,
                      due_date, asked_by, answered_by, created_at, updated_at
            "#,
        )
        .bind(&input.answer)
        .bind(&input.answered_by)
        .bind(rfi_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Close an answered RFI
    pub async fn close_rfi(&self, rfi_id: Uuid) -> AppResult<Rfi> {
        let existing = self.get_rfi(rfi_id).await?;

        if existing.answer.is_none() {
            return Err(AppError::InvalidStatusTransition(
                "Cannot close an RFI without an answer".to_string(),
            ));
        }

        if existing.status == RfiStatus::Closed {
            return Err(AppError::InvalidStatusTransition(
                "RFI is already closed".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, RfiRow>(
            r#"
            UPDATE rfis
            SET status = 'closed', updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, number, subject, question, answer, status,
                      due_date, asked_by, answered_by, created_at, updated_at
            "#,
        )
        .bind(rfi_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete an RFI and its attachments
    pub async fn delete_rfi(&self, rfi_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM file_attachments WHERE parent_kind = 'rfi' AND parent_id = $1")
            .bind(rfi_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM rfis WHERE id = $1")
            .bind(rfi_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("RFI".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }
}
