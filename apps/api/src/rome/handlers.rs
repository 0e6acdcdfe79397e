//! Axum route handlers for ROME lookups.

use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::rome::catalog::{lookup, search, RomeEntry};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/v1/rome/:code
pub async fn handle_get_rome(AppPath(code): AppPath<String>) -> Result<Json<RomeEntry>, AppError> {
    lookup(&code)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ROME code {code} not found")))
}

/// GET /api/v1/rome?q=
pub async fn handle_search_rome(
    AppQuery(params): AppQuery<SearchQuery>,
) -> Json<Vec<RomeEntry>> {
    let query = params.q.unwrap_or_default();
    Json(search(&query).into_iter().copied().collect())
}
