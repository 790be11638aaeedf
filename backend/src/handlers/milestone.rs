//! Milestone HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::milestone::{CreateMilestoneInput, MilestoneService, UpdateMilestoneInput};
use crate::AppState;

/// List milestones for a project, by date
pub async fn list_milestones(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MilestoneService::new(state.db.clone());

    match service.list_milestones(project_id).await {
        Ok(milestones) => (
            StatusCode::OK,
            Json(serde_json::json!({ "milestones": milestones })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a milestone to a project
pub async fn create_milestone(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<CreateMilestoneInput>,
) -> impl IntoResponse {
    let service = MilestoneService::new(state.db.clone());

    match service.create_milestone(project_id, input).await {
        Ok(milestone) => (StatusCode::CREATED, Json(milestone)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a milestone
pub async fn update_milestone(
    State(state): State<AppState>,
    Path(milestone_id): Path<Uuid>,
    Json(input): Json<UpdateMilestoneInput>,
) -> impl IntoResponse {
    let service = MilestoneService::new(state.db.clone());

    match service.update_milestone(milestone_id, input).await {
        Ok(milestone) => (StatusCode::OK, Json(milestone)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Mark a milestone complete
pub async fn complete_milestone(
    State(state): State<AppState>,
    Path(milestone_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MilestoneService::new(state.db.clone());

    match service.complete_milestone(milestone_id).await {
        Ok(milestone) => (StatusCode::OK, Json(milestone)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a milestone
pub async fn delete_milestone(
    State(state): State<AppState>,
    Path(milestone_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MilestoneService::new(state.db.clone());

    match service.delete_milestone(milestone_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
