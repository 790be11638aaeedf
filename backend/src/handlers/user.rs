//! User directory handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::UserService;
use crate::AppState;

/// List all registered users
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let service = UserService::new(state.db.clone());

    match service.list_users().await {
        Ok(users) => (StatusCode::OK, Json(serde_json::json!({ "users": users }))).into_response(),
        Err(e) => e.into_response(),
    }
}
