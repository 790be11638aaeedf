//! File attachment service
//!
//! Attachment content lives in the database row (bytea). Listing returns
//! metadata only; content is fetched on download.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{AttachmentParentKind, FileAttachment};

/// Upload size cap, 25 MB
const MAX_ATTACHMENT_BYTES: usize = 25 * 1024 * 1024;

/// Attachment service for files bound to projects, tasks, submittals, and RFIs
#[derive(Clone)]
pub struct AttachmentService {
    db: PgPool,
}

/// Database row for attachment metadata
#[derive(Debug, sqlx::FromRow)]
struct AttachmentRow {
    id: Uuid,
    parent_kind: String,
    parent_id: Uuid,
    filename: String,
    content_type: String,
    byte_size: i64,
    uploaded_by: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AttachmentRow> for FileAttachment {
    fn from(row: AttachmentRow) -> Self {
        FileAttachment {
            id: row.id,
            parent_kind: AttachmentParentKind::from_str(&row.parent_kind)
                .unwrap_or(AttachmentParentKind::Project),
            parent_id: row.parent_id,
            filename: row.filename,
            content_type: row.content_type,
            byte_size: row.byte_size,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
        }
    }
}

impl AttachmentService {
    /// Create a new AttachmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get attachment metadata for a parent record, newest first
    pub async fn list_attachments(
        &self,
        parent_kind: AttachmentParentKind,
        parent_id: Uuid,
    ) -> AppResult<Vec<FileAttachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(
            r#"
            SELECT id, parent_kind, parent_id, filename, content_type, byte_size,
                   uploaded_by, created_at
            FROM file_attachments
            WHERE parent_kind = $1 AND parent_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(parent_kind.as_str())
        .bind(parent_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(FileAttachment::from).collect())
    }

    /// Store an uploaded file bound to a parent record
    pub async fn upload_attachment(
        &self,
        parent_kind: AttachmentParentKind,
        parent_id: Uuid,
        filename: String,
        content_type: String,
        data: Vec<u8>,
        uploaded_by: Option<String>,
    ) -> AppResult<FileAttachment> {
        if filename.trim().is_empty() {
            return Err(AppError::Validation {
                field: "filename".to_string(),
                message: "Filename cannot be empty".to_string(),
            });
        }
        if data.is_empty() {
            return Err(AppError::Validation {
                field: "file".to_string(),
                message: "File is empty".to_string(),
            });
        }
        if data.len() > MAX_ATTACHMENT_BYTES {
            return Err(AppError::Validation {
                field: "file".to_string(),
                message: format!(
                    "File exceeds the {} MB limit",
                    MAX_ATTACHMENT_BYTES / (1024 * 1024)
                ),
            });
        }

        self.check_parent_exists(parent_kind, parent_id).await?;

        let byte_size = data.len() as i64;
        let row = sqlx::query_as::<_, AttachmentRow>(
            r#"
            INSERT INTO file_attachments
                (parent_kind, parent_id, filename, content_type, byte_size, content, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, parent_kind, parent_id, filename, content_type, byte_size,
                      uploaded_by, created_at
            "#,
        )
        .bind(parent_kind.as_str())
        .bind(parent_id)
        .bind(&filename)
        .bind(&content_type)
        .bind(byte_size)
        .bind(&data)
        .bind(&uploaded_by)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get an attachment's metadata and content bytes
    pub async fn download_attachment(
        &self,
        attachment_id: Uuid,
    ) -> AppResult<(FileAttachment, Vec<u8>)> {
        let row = sqlx::query_as::<_, AttachmentContentRow>(
            r#"
            SELECT id, parent_kind, parent_id, filename, content_type, byte_size,
                   content, uploaded_by, created_at
            FROM file_attachments
            WHERE id = $1
            "#,
        )
        .bind(attachment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Attachment".to_string()))?;

        let content = row.content;
        let meta = FileAttachment {
            id: row.id,
            parent_kind: AttachmentParentKind::from_str(&row.parent_kind)
                .unwrap_or(AttachmentParentKind::Project),
            parent_id: row.parent_id,
            filename: row.filename,
            content_type: row.content_type,
            byte_size: row.byte_size,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
        };

        Ok((meta, content))
    }

    /// Delete an attachment
    pub async fn delete_attachment(&self, attachment_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM file_attachments WHERE id = $1")
            .bind(attachment_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attachment".to_string()));
        }

        Ok(())
    }

    async fn check_parent_exists(
        &self,
        parent_kind: AttachmentParentKind,
        parent_id: Uuid,
    ) -> AppResult<()> {
        let (table, resource) = match parent_kind {
            AttachmentParentKind::Project => ("projects", "Project"),
            AttachmentParentKind::Task => ("tasks", "Task"),
            AttachmentParentKind::Submittal => ("submittals", "Submittal"),
            AttachmentParentKind::Rfi => ("rfis", "RFI"),
        };

        let query = format!("SELECT COUNT(*) FROM {} WHERE id = $1", table);
        let exists = sqlx::query_scalar::<_, i64>(&query)
            .bind(parent_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound(resource.to_string()));
        }

        Ok(())
    }
}

/// Database row including content bytes, fetched only on download
#[derive(Debug, sqlx::FromRow)]
struct AttachmentContentRow {
    id: Uuid,
    parent_kind: String,
    parent_id: Uuid,
    filename: String,
    content_type: String,
    byte_size: i64,
    content: Vec<u8>,
    uploaded_by: Option<String>,
    created_at: DateTime<Utc>,
}
