//! Dashboard HTTP handlers

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::AppError;
use crate::services::dashboard::DashboardMetrics;
use crate::services::DashboardService;
use crate::AppState;

/// Headline counts for the dashboard cards
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, AppError> {
    let service = DashboardService::new(state.db.clone());
    let metrics = service.get_metrics(Utc::now().date_naive()).await?;

    Ok(Json(metrics))
}
