//! Task HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::task::{CreateTaskInput, TaskFilter, UpdateTaskInput};
use crate::services::TaskService;
use crate::AppState;

/// List tasks with optional filters
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());

    match service.list_tasks(filter).await {
        Ok(tasks) => (StatusCode::OK, Json(serde_json::json!({ "tasks": tasks }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List open tasks past their due date
pub async fn list_overdue_tasks(State(state): State<AppState>) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());
    let today = Utc::now().date_naive();

    match service.list_overdue_tasks(today).await {
        Ok(tasks) => (StatusCode::OK, Json(serde_json::json!({ "tasks": tasks }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific task
pub async fn get_task(State(state): State<AppState>, Path(task_id): Path<Uuid>) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());

    match service.get_task(task_id).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new task
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());

    match service.create_task(input).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a task
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());

    match service.update_task(task_id, input).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = TaskService::new(state.db.clone());

    match service.delete_task(task_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Export tasks matching the filter as CSV
pub async fn export_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Result<impl IntoResponse, AppError> {
    let service = TaskService::new(state.db.clone());
    let csv = service.export_csv(filter).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tasks.csv\"",
            ),
        ],
        csv,
    ))
}
