//! Table browser handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use sea_orm::JsonValue;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// Browsable tables
#[derive(Debug, Serialize, ToSchema)]
pub struct TableList {
    #[schema(example = json!(["sales"]))]
    pub tables: Vec<String>,
}

/// Create table browser routes
pub fn table_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tables))
        .route("/:name", get(browse_table))
}

/// List browsable tables
#[utoipa::path(
    get,
    path = "/tables",
    tag = "Tables",
    responses(
        (status = 200, description = "Table names", body = TableList),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tables(State(state): State<AppState>) -> AppResult<Json<TableList>> {
    let tables = state.table_service.list_tables().await?;
    Ok(Json(TableList { tables }))
}

/// Fetch one page of a table's rows
#[utoipa::path(
    get,
    path = "/tables/{name}",
    tag = "Tables",
    params(
        ("name" = String, Path, description = "Table name"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Rows as JSON objects with pagination metadata"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Unknown table")
    ),
    security(("bearer_auth" = []))
)]
pub async fn browse_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<JsonValue>>> {
    let page = state.table_service.browse(&name, &params).await?;
    Ok(Json(page))
}
