//! Department HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::department::{CreateDepartmentInput, DepartmentService};
use crate::AppState;
use shared::models::suggest_department;

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub text: String,
}

/// List all departments
pub async fn list_departments(State(state): State<AppState>) -> impl IntoResponse {
    let service = DepartmentService::new(state.db.clone());

    match service.list_departments().await {
        Ok(departments) => (
            StatusCode::OK,
            Json(serde_json::json!({ "departments": departments })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new department
pub async fn create_department(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartmentInput>,
) -> impl IntoResponse {
    let service = DepartmentService::new(state.db.clone());

    match service.create_department(input).await {
        Ok(department) => (StatusCode::CREATED, Json(department)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a department
pub async fn delete_department(
    State(state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = DepartmentService::new(state.db.clone());

    match service.delete_department(department_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Suggest a department for free text via the keyword routing table
pub async fn get_department_suggestion(Query(query): Query<SuggestQuery>) -> impl IntoResponse {
    let suggestion = suggest_department(&query.text);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "department": suggestion })),
    )
}
