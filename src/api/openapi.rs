//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, dashboard_handler, prediction_handler, table_handler};
use crate::domain::{FeatureKind, FeatureSchema, ModelSchema, PredictionForm};
use crate::services::{PredictionOutcome, SessionToken};
use crate::types::PaginationMeta;

/// OpenAPI documentation for the sales dashboard
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Dashboard",
        version = "0.1.0",
        description = "Sign-up and login, database table browsing and sales prediction"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        dashboard_handler::dashboard,
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        table_handler::list_tables,
        table_handler::browse_table,
        prediction_handler::schema,
        prediction_handler::predict,
    ),
    components(
        schemas(
            dashboard_handler::DashboardView,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::SessionResponse,
            SessionToken,
            table_handler::TableList,
            PaginationMeta,
            FeatureKind,
            FeatureSchema,
            ModelSchema,
            PredictionForm,
            PredictionOutcome,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dashboard", description = "Session gate"),
        (name = "Authentication", description = "Sign-up, login and logout"),
        (name = "Tables", description = "Database table browser"),
        (name = "Prediction", description = "Sales prediction")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for session bearer tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/dashboard",
            "/auth/register",
            "/auth/login",
            "/auth/logout",
            "/tables",
            "/tables/{name}",
            "/predict",
            "/predict/schema",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
