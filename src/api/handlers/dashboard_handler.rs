//! Dashboard gate.

use axum::{response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::OptionalSession;
use crate::api::AppState;

/// What the dashboard offers to the caller
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DashboardView {
    /// No session: only login or sign-up are available
    Auth { actions: Vec<String> },
    /// Authenticated: pick a mode
    Home { username: String, modes: Vec<String> },
}

impl DashboardView {
    fn for_session(session: OptionalSession) -> Self {
        match session.0 {
            Some(current) => DashboardView::Home {
                username: current.username,
                modes: vec!["tables".to_string(), "predict".to_string()],
            },
            None => DashboardView::Auth {
                actions: vec!["login".to_string(), "register".to_string()],
            },
        }
    }
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Dashboard gate
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Auth view without a session, home view with one", body = DashboardView)
    )
)]
pub async fn dashboard(session: OptionalSession) -> Json<DashboardView> {
    Json(DashboardView::for_session(session))
}
