//! Factory and factory contact HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::factory::{
    CreateFactoryInput, FactoryContactInput, FactoryService, UpdateFactoryInput,
};
use crate::AppState;

/// List all factories, active first
pub async fn list_factories(State(state): State<AppState>) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.list_factories().await {
        Ok(factories) => (
            StatusCode::OK,
            Json(serde_json::json!({ "factories": factories })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific factory
pub async fn get_factory(
    State(state): State<AppState>,
    Path(factory_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.get_factory(factory_id).await {
        Ok(factory) => (StatusCode::OK, Json(factory)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new factory
pub async fn create_factory(
    State(state): State<AppState>,
    Json(input): Json<CreateFactoryInput>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.create_factory(input).await {
        Ok(factory) => (StatusCode::CREATED, Json(factory)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a factory
pub async fn update_factory(
    State(state): State<AppState>,
    Path(factory_id): Path<Uuid>,
    Json(input): Json<UpdateFactoryInput>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.update_factory(factory_id, input).await {
        Ok(factory) => (StatusCode::OK, Json(factory)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a factory with no linked projects
pub async fn delete_factory(
    State(state): State<AppState>,
    Path(factory_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.delete_factory(factory_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List contacts at one factory
pub async fn list_factory_contacts(
    State(state): State<AppState>,
    Path(factory_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.list_factory_contacts(factory_id).await {
        Ok(contacts) => (
            StatusCode::OK,
            Json(serde_json::json!({ "contacts": contacts })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a contact to a factory
pub async fn create_factory_contact(
    State(state): State<AppState>,
    Path(factory_id): Path<Uuid>,
    Json(input): Json<FactoryContactInput>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.create_factory_contact(factory_id, input).await {
        Ok(contact) => (StatusCode::CREATED, Json(contact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a factory contact
pub async fn update_factory_contact(
    State(state): State<AppState>,
    Path((factory_id, contact_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<FactoryContactInput>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service
        .update_factory_contact(factory_id, contact_id, input)
        .await
    {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Remove a factory contact
pub async fn delete_factory_contact(
    State(state): State<AppState>,
    Path((factory_id, contact_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.delete_factory_contact(factory_id, contact_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Factory contacts bucketed by factory
pub async fn factory_contacts_grouped(State(state): State<AppState>) -> impl IntoResponse {
    let service = FactoryService::new(state.db.clone());

    match service.group_contacts_by_factory().await {
        Ok(groups) => (StatusCode::OK, Json(serde_json::json!({ "groups": groups })))
            .into_response(),
        Err(e) => e.into_response(),
    }
}
