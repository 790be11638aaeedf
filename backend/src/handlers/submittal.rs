//! Submittal HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::submittal::{CreateSubmittalInput, SubmittalFilter, UpdateSubmittalInput};
use crate::services::SubmittalService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ResubmitRequest {
    /// Defaults to today when omitted
    pub sent_date: Option<NaiveDate>,
}

/// List submittals with optional filters
pub async fn list_submittals(
    State(state): State<AppState>,
    Query(filter): Query<SubmittalFilter>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());

    match service.list_submittals(filter).await {
        Ok(submittals) => (
            StatusCode::OK,
            Json(serde_json::json!({ "submittals": submittals })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific submittal
pub async fn get_submittal(
    State(state): State<AppState>,
    Path(submittal_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());

    match service.get_submittal(submittal_id).await {
        Ok(submittal) => (StatusCode::OK, Json(submittal)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new submittal at revision 0
pub async fn create_submittal(
    State(state): State<AppState>,
    Json(input): Json<CreateSubmittalInput>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());

    match service.create_submittal(input).await {
        Ok(submittal) => (StatusCode::CREATED, Json(submittal)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a submittal
pub async fn update_submittal(
    State(state): State<AppState>,
    Path(submittal_id): Path<Uuid>,
    Json(input): Json<UpdateSubmittalInput>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());

    match service.update_submittal(submittal_id, input).await {
        Ok(submittal) => (StatusCode::OK, Json(submittal)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Resubmit after revise-and-resubmit: bumps the revision
pub async fn resubmit_submittal(
    State(state): State<AppState>,
    Path(submittal_id): Path<Uuid>,
    Json(body): Json<ResubmitRequest>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());
    let sent_date = body.sent_date.unwrap_or_else(|| Utc::now().date_naive());

    match service.resubmit_submittal(submittal_id, sent_date).await {
        Ok(submittal) => (StatusCode::OK, Json(submittal)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a submittal
pub async fn delete_submittal(
    State(state): State<AppState>,
    Path(submittal_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SubmittalService::new(state.db.clone());

    match service.delete_submittal(submittal_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
