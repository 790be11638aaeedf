//! Contact directory HTTP handlers
//!
//! Covers the merged assignable list, directory CRUD, category grouping,
//! CSV import/export, and import history.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::contact::{ContactFilter, CreateContactInput, UpdateContactInput};
use crate::services::ContactService;
use crate::AppState;

/// Merged assignable contacts: users plus contacts at active factories
pub async fn list_contacts(State(state): State<AppState>) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.list_assignable_contacts().await {
        Ok(contacts) => (
            StatusCode::OK,
            Json(serde_json::json!({ "contacts": contacts })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List directory contacts with optional category and search filters
pub async fn list_directory_contacts(
    State(state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.list_directory_contacts(filter).await {
        Ok(contacts) => (
            StatusCode::OK,
            Json(serde_json::json!({ "contacts": contacts })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a directory contact
pub async fn get_directory_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.get_directory_contact(contact_id).await {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a directory contact
pub async fn create_directory_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactInput>,
) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.create_directory_contact(input).await {
        Ok(contact) => (StatusCode::CREATED, Json(contact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a directory contact
pub async fn update_directory_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<Uuid>,
    Json(input): Json<UpdateContactInput>,
) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.update_directory_contact(contact_id, input).await {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a directory contact
pub async fn delete_directory_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.delete_directory_contact(contact_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Directory contacts bucketed by category
pub async fn directory_contacts_grouped(State(state): State<AppState>) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.group_directory_by_category().await {
        Ok(groups) => {
            (StatusCode::OK, Json(serde_json::json!({ "groups": groups }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Export the directory as CSV
pub async fn export_directory_contacts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let service = ContactService::new(state.db.clone());
    let csv = service.export_directory_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contacts.csv\"",
            ),
        ],
        csv,
    ))
}

/// Import contacts from an uploaded CSV file
pub async fn import_contacts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut filename = String::new();
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

        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or("contacts.csv").to_string();
            match field.bytes().await {
                Ok(bytes) => data = bytes.to_vec(),
                Err(e) => {
                    return AppError::Validation {
                        field: "file".to_string(),
                        message: format!("Failed to read file: {}", e),
                    }
                    .into_response();
                }
            }
        }
    }

    if data.is_empty() {
        return AppError::Validation {
            field: "file".to_string(),
            message: "Multipart field 'file' is required".to_string(),
        }
        .into_response();
    }

    let service = ContactService::new(state.db.clone());
    match service
        .import_contacts(&filename, &data, Some(current_user.0.name.clone()))
        .await
    {
        Ok(log) => (StatusCode::CREATED, Json(log)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List past imports, newest first
pub async fn list_import_logs(State(state): State<AppState>) -> impl IntoResponse {
    let service = ContactService::new(state.db.clone());

    match service.list_import_logs().await {
        Ok(logs) => (StatusCode::OK, Json(serde_json::json!({ "logs": logs }))).into_response(),
        Err(e) => e.into_response(),
    }
}
