//! Calendar aggregation HTTP handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::calendar::CalendarFilter;
use crate::services::{ics, CalendarService};
use crate::AppState;
use shared::types::DateRange;

#[derive(Deserialize)]
pub struct CalendarQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
    /// Defaults to the current month
    pub month: Option<u32>,
    pub project_id: Option<Uuid>,
}

/// Month view: due-dated items bucketed by day
pub async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> impl IntoResponse {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let filter = CalendarFilter {
        project_id: query.project_id,
    };

    let service = CalendarService::new(state.db.clone());
    match service.month_view(year, month, filter).await {
        Ok(days) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "year": year,
                "month": month,
                "days": days,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// ICS feed of the month's due-dated items
pub async fn export_calendar_ics(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let range = DateRange::month(year, month).ok_or_else(|| AppError::Validation {
        field: "month".to_string(),
        message: format!("Invalid year/month: {}-{}", year, month),
    })?;
    let filter = CalendarFilter {
        project_id: query.project_id,
    };

    let service = CalendarService::new(state.db.clone());
    let items = service.collect(&range, &filter).await?;
    let calendar = ics::build_calendar(&items, Utc::now())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"schedule_{}_{:02}.ics\"",
                    year, month
                ),
            ),
        ],
        calendar,
    ))
}
