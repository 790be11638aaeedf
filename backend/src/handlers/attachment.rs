//! File attachment HTTP handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::AttachmentService;
use crate::AppState;
use shared::models::AttachmentParentKind;

#[derive(Deserialize)]
pub struct AttachmentListQuery {
    pub parent_kind: String,
    pub parent_id: Uuid,
}

/// List attachments on a parent record, newest first
pub async fn list_attachments(
    State(state): State<AppState>,
    Query(query): Query<AttachmentListQuery>,
) -> impl IntoResponse {
    let parent_kind = match AttachmentParentKind::from_str(&query.parent_kind) {
        Some(kind) => kind,
        None => {
            return AppError::Validation {
                field: "parent_kind".to_string(),
                message: format!("Unknown parent kind: {}", query.parent_kind),
            }
            .into_response();
        }
    };

    let service = AttachmentService::new(state.db.clone());
    match service.list_attachments(parent_kind, query.parent_id).await {
        Ok(attachments) => (
            StatusCode::OK,
            Json(serde_json::json!({ "attachments": attachments })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Upload a file bound to a parent record
///
/// Multipart fields: `parent_kind`, `parent_id`, and `file`.
pub async fn upload_attachment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut parent_kind: Option<String> = None;
    let mut parent_id: Option<String> = None;
    let mut filename = String::new();
    let mut content_type = "application/octet-stream".to_string();
    let mut data: Vec<u8> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return AppError::Validation {
                    field: "file".to_string(),
                    message: format!("Invalid multipart payload: {}", e),
                }
                .into_response();
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("parent_kind") => match field.text().await {
                Ok(text) => parent_kind = Some(text),
                Err(e) => return multipart_error("parent_kind", e).into_response(),
            },
            Some("parent_id") => match field.text().await {
                Ok(text) => parent_id = Some(text),
                Err(e) => return multipart_error("parent_id", e).into_response(),
            },
            Some("file") => {
                filename = field.file_name().unwrap_or("upload.bin").to_string();
                if let Some(ct) = field.content_type() {
                    content_type = ct.to_string();
                }
                match field.bytes().await {
                    Ok(bytes) => data = bytes.to_vec(),
                    Err(e) => return multipart_error("file", e).into_response(),
                }
            }
            _ => {}
        }
    }

    let parent_kind = match parent_kind.as_deref().and_then(AttachmentParentKind::from_str) {
        Some(kind) => kind,
        None => {
            return AppError::Validation {
                field: "parent_kind".to_string(),
                message: "Multipart field 'parent_kind' must be project, task, submittal, or rfi"
                    .to_string(),
            }
            .into_response();
        }
    };
    let parent_id = match parent_id.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => id,
        _ => {
            return AppError::Validation {
                field: "parent_id".to_string(),
                message: "Multipart field 'parent_id' must be a UUID".to_string(),
            }
            .into_response();
        }
    };

    let service = AttachmentService::new(state.db.clone());
    match service
        .upload_attachment(
            parent_kind,
            parent_id,
            filename,
            content_type,
            data,
            Some(current_user.0.name.clone()),
        )
        .await
    {
        Ok(attachment) => (StatusCode::CREATED, Json(attachment)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Download the stored file bytes
pub async fn download_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = AttachmentService::new(state.db.clone());
    let (attachment, content) = service.download_attachment(attachment_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, attachment.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    header_safe(&attachment.filename)
                ),
            ),
        ],
        content,
    ))
}

/// Delete an attachment
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = AttachmentService::new(state.db.clone());

    match service.delete_attachment(attachment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

fn multipart_error(field: &str, err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: format!("Failed to read multipart field: {}", err),
    }
}

/// Strip characters that would break a Content-Disposition header value
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect()
}
