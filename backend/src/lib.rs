use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;

use crate::middleware as auth_middleware;
use config::Config;
use state::AppState;

/// Builds the full application router: public, employee, approver and
/// tenant-administration routes plus the shared layers.
pub fn build_router(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", docs::ApiDoc::openapi()));

    // Any authenticated employee
    let user_routes = Router::new()
        .route(
            "/api/leave/requests",
            post(handlers::submit_leave_request),
        )
        .route("/api/leave/requests/me", get(handlers::my_leave_requests))
        .route(
            "/api/leave/requests/{id}",
            get(handlers::get_leave_request).delete(handlers::cancel_leave_request),
        )
        .route("/api/leave/preview", post(handlers::preview_leave_request))
        .route("/api/leave/balances/me", get(handlers::my_balances))
        .route("/api/leave/categories", get(handlers::list_categories))
        .route("/api/holidays", get(handlers::list_holidays_for_year))
        .route("/api/exits", post(handlers::create_exit_request))
        .route("/api/exits/me", get(handlers::my_exit_requests))
        .route(
            "/api/exits/{id}/withdraw",
            put(handlers::withdraw_exit_request),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth,
        ));

    // Managers, HR and admins
    let approver_routes = Router::new()
        .route(
            "/api/admin/leave/requests",
            get(handlers::admin::list_leave_requests),
        )
        .route(
            "/api/admin/leave/requests/{id}/approve",
            put(handlers::admin::approve_leave_request),
        )
        .route(
            "/api/admin/leave/requests/{id}/reject",
            put(handlers::admin::reject_leave_request),
        )
        .route("/api/admin/exits", get(handlers::admin::list_exit_requests))
        .route(
            "/api/admin/exits/{id}/status",
            put(handlers::admin::update_exit_status),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth_approver,
        ));

    // HR and admins
    let admin_routes = Router::new()
        .route(
            "/api/admin/leave/policy",
            get(handlers::admin::get_leave_policy).put(handlers::admin::update_leave_policy),
        )
        .route(
            "/api/admin/leave/categories",
            get(handlers::admin::list_leave_categories)
                .post(handlers::admin::create_leave_category),
        )
        .route(
            "/api/admin/leave/categories/{id}",
            put(handlers::admin::update_leave_category),
        )
        .route(
            "/api/admin/holidays",
            get(handlers::admin::list_holidays).post(handlers::admin::create_holiday),
        )
        .route(
            "/api/admin/holidays/{id}",
            delete(handlers::admin::delete_holiday),
        )
        .route(
            "/api/admin/leave/balances",
            get(handlers::admin::list_balances),
        )
        .route(
            "/api/admin/leave/balances/open-year",
            post(handlers::admin::open_leave_year),
        )
        .route(
            "/api/admin/leave/balances/{id}/adjust",
            post(handlers::admin::adjust_balance),
        )
        .route(
            "/api/admin/employees",
            get(handlers::admin::list_employees).post(handlers::admin::create_employee),
        )
        .route(
            "/api/admin/onboarding",
            get(handlers::admin::list_onboarding).post(handlers::admin::create_onboarding),
        )
        .route(
            "/api/admin/onboarding/{id}/status",
            put(handlers::admin::update_onboarding_status),
        )
        .route(
            "/api/admin/leave/export",
            get(handlers::admin::export_leave_requests),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth_tenant_admin,
        ));

    let cors = cors_layer(&state.config);

    // Layers run outermost-first: request id, trace, CORS, then error logging.
    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(approver_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(auth_middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum_middleware::from_fn(auth_middleware::log_error_responses)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(24 * 60 * 60));

    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
    }
}
