//! Official text endpoints.

use axum::extract::{Path, RawQuery, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{OfficialText, PagedResult, SearchFilter};
use crate::AppState;

/// GET /api/textes - Filtered, paginated list of texts.
pub async fn list_texts(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<PagedResult<OfficialText>> {
    let filter = SearchFilter::from_query_string(query.as_deref().unwrap_or_default())?;
    let page = state.service.list_texts(&filter).await?;

    tracing::debug!(
        total = page.total_count,
        page = page.page,
        "Listed official texts"
    );
    success(page)
}

/// GET /api/textes/{id} - Get a single text.
pub async fn get_text(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<OfficialText> {
    match state.service.get_text(id).await? {
        Some(text) => success(text),
        None => Err(AppError::NotFound(format!("Text {} not found", id))),
    }
}
