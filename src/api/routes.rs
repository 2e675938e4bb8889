//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, dashboard_routes, logout_routes, prediction_routes, table_routes,
};
use super::middleware::session_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Gate: answers with or without a session
        .merge(dashboard_routes())
        .nest(
            "/auth",
            auth_routes().merge(logout_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                session_middleware,
            ))),
        )
        .nest(
            "/tables",
            table_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                session_middleware,
            )),
        )
        .nest(
            "/predict",
            prediction_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                session_middleware,
            )),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Sales Dashboard"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    model: ServiceStatus,
    sessions: SessionHealth,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct SessionHealth {
    active: usize,
}

/// Health check endpoint.
///
/// The database decides overall health. A model that has not loaded only
/// degrades the prediction routes, so it is reported without failing the check.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let model_status = ServiceStatus {
        status: if state.prediction_service.is_loaded() {
            "loaded"
        } else {
            "unavailable"
        },
        error: None,
    };

    let db_healthy = db_status.status == "healthy";

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
            model: model_status,
            sessions: SessionHealth {
                active: state.session_service.active_count().await,
            },
        },
    };

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
