//! Dealer management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::dealer::{CreateDealerInput, DealerService, UpdateDealerInput};
use crate::AppState;

/// List all dealers
pub async fn list_dealers(State(state): State<AppState>) -> impl IntoResponse {
    let service = DealerService::new(state.db.clone());

    match service.list_dealers().await {
        Ok(dealers) => {
            (StatusCode::OK, Json(serde_json::json!({ "dealers": dealers }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific dealer
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(dealer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = DealerService::new(state.db.clone());

    match service.get_dealer(dealer_id).await {
        Ok(dealer) => (StatusCode::OK, Json(dealer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new dealer
pub async fn create_dealer(
    State(state): State<AppState>,
    Json(input): Json<CreateDealerInput>,
) -> impl IntoResponse {
    let service = DealerService::new(state.db.clone());

    match service.create_dealer(input).await {
        Ok(dealer) => (StatusCode::CREATED, Json(dealer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a dealer
pub async fn update_dealer(
    State(state): State<AppState>,
    Path(dealer_id): Path<Uuid>,
    Json(input): Json<UpdateDealerInput>,
) -> impl IntoResponse {
    let service = DealerService::new(state.db.clone());

    match service.update_dealer(dealer_id, input).await {
        Ok(dealer) => (StatusCode::OK, Json(dealer)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a dealer with no linked projects
pub async fn delete_dealer(
    State(state): State<AppState>,
    Path(dealer_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = DealerService::new(state.db.clone());

    match service.delete_dealer(dealer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
