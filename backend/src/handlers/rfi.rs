//! RFI HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::rfi::{AnswerRfiInput, CreateRfiInput, RfiFilter, UpdateRfiInput};
use crate::services::{PrintRenderer, ProjectService, RfiService};
use crate::AppState;

/// List RFIs with optional filters
pub async fn list_rfis(
    State(state): State<AppState>,
    Query(filter): Query<RfiFilter>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.list_rfis(filter).await {
        Ok(rfis) => (StatusCode::OK, Json(serde_json::json!({ "rfis": rfis }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific RFI
pub async fn get_rfi(State(state): State<AppState>, Path(rfi_id): Path<Uuid>) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.get_rfi(rfi_id).await {
        Ok(rfi) => (StatusCode::OK, Json(rfi)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new RFI
pub async fn create_rfi(
    State(state): State<AppState>,
    Json(input): Json<CreateRfiInput>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.create_rfi(input).await {
        Ok(rfi) => (StatusCode::CREATED, Json(rfi)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update an RFI
pub async fn update_rfi(
    State(state): State<AppState>,
    Path(rfi_id): Path<Uuid>,
    Json(input): Json<UpdateRfiInput>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.update_rfi(rfi_id, input).await {
        Ok(rfi) => (StatusCode::OK, Json(rfi)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record the answer to an open RFI
pub async fn answer_rfi(
    State(state): State<AppState>,
    Path(rfi_id): Path<Uuid>,
    Json(input): Json<AnswerRfiInput>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.answer_rfi(rfi_id, input).await {
        Ok(rfi) => (StatusCode::OK, Json(rfi)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Close an answered RFI
pub async fn close_rfi(
    State(state): State<AppState>,
    Path(rfi_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.close_rfi(rfi_id).await {
        Ok(rfi) => (StatusCode::OK, Json(rfi)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete an RFI
pub async fn delete_rfi(
    State(state): State<AppState>,
    Path(rfi_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = RfiService::new(state.db.clone());

    match service.delete_rfi(rfi_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Print-ready sheet for one RFI
pub async fn print_rfi(
    State(state): State<AppState>,
    Path(rfi_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let rfi = RfiService::new(state.db.clone()).get_rfi(rfi_id).await?;
    let project = ProjectService::new(state.db.clone())
        .get_project(rfi.project_id)
        .await?;

    let today = Utc::now().date_naive();
    let html = PrintRenderer::rfi_sheet(&project, &rfi, today);

    Ok(Html(html))
}
