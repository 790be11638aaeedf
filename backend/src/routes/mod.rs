//! Route definitions for the Modular Build Tracking Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - user directory
        .nest("/users", user_routes())
        // Protected routes - factories and factory contacts
        .nest("/factories", factory_routes())
        // Protected routes - contact directory and merged views
        .nest("/contacts", contact_routes())
        // Protected routes - dealers
        .nest("/dealers", dealer_routes())
        // Protected routes - departments and keyword routing
        .nest("/departments", department_routes())
        // Protected routes - projects, milestones, exports
        .nest("/projects", project_routes())
        .nest("/milestones", milestone_routes())
        // Protected routes - tracked work
        .nest("/tasks", task_routes())
        .nest("/submittals", submittal_routes())
        .nest("/rfis", rfi_routes())
        // Protected routes - file attachments
        .nest("/attachments", attachment_routes())
        // Protected routes - calendar aggregation and ICS feed
        .nest("/calendar", calendar_routes())
        // Protected routes - dashboard metrics
        .nest("/dashboard", dashboard_routes())
}

/// Authentication routes (public, plus protected profile)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .nest("/me", me_routes())
}

/// Current-user routes (protected)
fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// User directory routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Factory management routes (protected)
fn factory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_factories).post(handlers::create_factory))
        .route(
            "/:factory_id",
            get(handlers::get_factory)
                .put(handlers::update_factory)
                .delete(handlers::delete_factory),
        )
        .route(
            "/:factory_id/contacts",
            get(handlers::list_factory_contacts).post(handlers::create_factory_contact),
        )
        .route(
            "/:factory_id/contacts/:contact_id",
            axum::routing::put(handlers::update_factory_contact)
                .delete(handlers::delete_factory_contact),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Contact directory routes (protected)
fn contact_routes() -> Router<AppState> {
    Router::new()
        // Merged assignable list (users + factory contacts)
        .route("/", get(handlers::list_contacts))
        // Directory contact CRUD
        .route(
            "/directory",
            get(handlers::list_directory_contacts).post(handlers::create_directory_contact),
        )
        .route("/directory/export", get(handlers::export_directory_contacts))
        .route("/directory/grouped", get(handlers::directory_contacts_grouped))
        .route(
            "/directory/:contact_id",
            get(handlers::get_directory_contact)
                .put(handlers::update_directory_contact)
                .delete(handlers::delete_directory_contact),
        )
        // Factory contacts grouped by factory
        .route("/factory/grouped", get(handlers::factory_contacts_grouped))
        // CSV import
        .route("/import", post(handlers::import_contacts))
        .route("/import/logs", get(handlers::list_import_logs))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dealer management routes (protected)
fn dealer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_dealers).post(handlers::create_dealer))
        .route(
            "/:dealer_id",
            get(handlers::get_dealer)
                .put(handlers::update_dealer)
                .delete(handlers::delete_dealer),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Department routes (protected)
fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_departments).post(handlers::create_department))
        .route("/suggest", get(handlers::get_department_suggestion))
        .route("/:department_id", axum::routing::delete(handlers::delete_department))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Project management routes (protected)
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_projects).post(handlers::create_project))
        .route(
            "/:project_id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/:project_id/milestones",
            get(handlers::list_milestones).post(handlers::create_milestone),
        )
        // Exports
        .route("/:project_id/export.xlsx", get(handlers::export_project_workbook))
        .route("/:project_id/print/tasks", get(handlers::print_project_tasks))
        .route("/:project_id/print/submittals", get(handlers::print_submittal_log))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Milestone routes (protected)
fn milestone_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:milestone_id",
            axum::routing::put(handlers::update_milestone).delete(handlers::delete_milestone),
        )
        .route("/:milestone_id/complete", post(handlers::complete_milestone))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Task management routes (protected)
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route("/overdue", get(handlers::list_overdue_tasks))
        .route("/export", get(handlers::export_tasks))
        .route(
            "/:task_id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Submittal management routes (protected)
fn submittal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_submittals).post(handlers::create_submittal))
        .route(
            "/:submittal_id",
            get(handlers::get_submittal)
                .put(handlers::update_submittal)
                .delete(handlers::delete_submittal),
        )
        .route("/:submittal_id/resubmit", post(handlers::resubmit_submittal))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// RFI management routes (protected)
fn rfi_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_rfis).post(handlers::create_rfi))
        .route(
            "/:rfi_id",
            get(handlers::get_rfi)
                .put(handlers::update_rfi)
                .delete(handlers::delete_rfi),
        )
        .route("/:rfi_id/answer", post(handlers::answer_rfi))
        .route("/:rfi_id/close", post(handlers::close_rfi))
        .route("/:rfi_id/print", get(handlers::print_rfi))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// File attachment routes (protected)
fn attachment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_attachments).post(handlers::upload_attachment))
        .route("/:attachment_id/download", get(handlers::download_attachment))
        .route(
            "/:attachment_id",
            axum::routing::delete(handlers::delete_attachment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Calendar routes (protected)
fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_calendar_month))
        .route("/export.ics", get(handlers::export_calendar_ics))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(handlers::get_dashboard_metrics))
        .route_layer(middleware::from_fn(auth_middleware))
}
