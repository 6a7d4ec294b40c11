//! Journal issue endpoints.

use axum::extract::{Path, RawQuery, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{JournalIssue, OfficialText, PagedResult, SearchFilter};
use crate::AppState;

/// GET /api/journaux - Filtered, paginated list of issues.
pub async fn list_issues(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<PagedResult<JournalIssue>> {
    let filter = SearchFilter::from_query_string(query.as_deref().unwrap_or_default())?;
    let page = state.service.list_issues(&filter).await?;

    tracing::debug!(
        total = page.total_count,
        page = page.page,
        "Listed journal issues"
    );
    success(page)
}

/// GET /api/journaux/{id} - Get a single issue.
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<JournalIssue> {
    match state.service.get_issue(id).await? {
        Some(issue) => success(issue),
        None => Err(AppError::NotFound(format!("Journal {} not found", id))),
    }
}

/// GET /api/journaux/{id}/textes - Texts published in an issue.
pub async fn get_issue_texts(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Vec<OfficialText>> {
    success(state.service.texts_for_issue(id).await?)
}
