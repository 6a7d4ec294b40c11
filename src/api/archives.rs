//! Reference data, archive and dashboard endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::models::{ArchiveYearSummary, DashboardStats, Institution, JournalIssue};
use crate::AppState;

/// GET /api/institutions - All issuing institutions, in display order.
pub async fn list_institutions(State(state): State<AppState>) -> ApiResult<Vec<Institution>> {
    success(state.service.list_institutions().await?)
}

/// GET /api/archives - Issue and text counts per year, newest first.
pub async fn list_archives(State(state): State<AppState>) -> ApiResult<Vec<ArchiveYearSummary>> {
    success(state.service.archives().await?)
}

/// GET /api/archives/{annee} - Issues published in a year.
pub async fn get_archive_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Vec<JournalIssue>> {
    success(state.service.issues_for_year(year).await?)
}

/// GET /api/statistiques - Portal dashboard figures.
pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    success(state.service.dashboard_stats().await?)
}
