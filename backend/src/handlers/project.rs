//! Project HTTP handlers, including workbook and print exports

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::project::{CreateProjectInput, ProjectFilter, UpdateProjectInput};
use crate::services::rfi::RfiFilter;
use crate::services::submittal::SubmittalFilter;
use crate::services::task::TaskFilter;
use crate::services::{
    PrintRenderer, ProjectService, RfiService, SubmittalService, TaskService, WorkbookExporter,
};
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// List projects with optional filters
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.list_projects(filter).await {
        Ok(projects) => (
            StatusCode::OK,
            Json(serde_json::json!({ "projects": projects })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific project
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.get_project(project_id).await {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new project
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.create_project(input).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.update_project(project_id, input).await {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a project and its dependent records
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProjectService::new(state.db.clone());

    match service.delete_project(project_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Styled multi-sheet workbook for one project
pub async fn export_project_workbook(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = ProjectService::new(state.db.clone())
        .get_project(project_id)
        .await?;
    let tasks = TaskService::new(state.db.clone())
        .list_tasks(TaskFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;
    let rfis = RfiService::new(state.db.clone())
        .list_rfis(RfiFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;
    let submittals = SubmittalService::new(state.db.clone())
        .list_submittals(SubmittalFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;

    let today = Utc::now().date_naive();
    let bytes = WorkbookExporter::project_workbook(&project, &tasks, &rfis, &submittals, today)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"project_{}.xlsx\"", project.number),
            ),
        ],
        bytes,
    ))
}

/// Print-ready task list for one project
pub async fn print_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let project = ProjectService::new(state.db.clone())
        .get_project(project_id)
        .await?;
    let tasks = TaskService::new(state.db.clone())
        .list_tasks(TaskFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;

    let today = Utc::now().date_naive();
    let html = PrintRenderer::task_list(&project, &tasks, today)?;

    Ok(Html(html))
}

/// Print-ready submittal log for one project
pub async fn print_submittal_log(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let project = ProjectService::new(state.db.clone())
        .get_project(project_id)
        .await?;
    let submittals = SubmittalService::new(state.db.clone())
        .list_submittals(SubmittalFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;

    let today = Utc::now().date_naive();
    let html = PrintRenderer::submittal_log(&project, &submittals, today)?;

    Ok(Html(html))
}
