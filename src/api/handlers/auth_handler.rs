//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Extension, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{CurrentSession, SessionToken};
use crate::types::{Created, NoContent};

/// Sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "bob")]
    pub username: String,
    /// Password (no strength rules apply)
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "pw1")]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "bob")]
    pub username: String,
    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "pw1")]
    pub password: String,
}

/// Session started by a successful sign-up or login
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session: SessionToken,
    #[schema(example = "bob")]
    pub username: String,
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create authentication routes that need a live session
pub fn logout_routes() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session started", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<SessionResponse>> {
    let credential = state
        .auth_service
        .register(payload.username, payload.password)
        .await?;

    let session = state.session_service.start(&credential.username).await?;

    Ok(Created(SessionResponse {
        session,
        username: credential.username,
    }))
}

/// Log in and start a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    state
        .auth_service
        .authenticate(payload.username.clone(), payload.password)
        .await?;

    let session = state.session_service.start(&payload.username).await?;

    Ok(Json(SessionResponse {
        session,
        username: payload.username,
    }))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<NoContent> {
    state.session_service.end(current.session_id).await?;
    Ok(NoContent)
}
