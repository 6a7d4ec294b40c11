//! Data-source interface consumed by the HTTP API and the list views.
//!
//! Two implementations share the contract: [`MockGazetteService`] answers from
//! the in-memory record store after an artificial delay, and
//! [`HttpGazetteService`] forwards to a remote backend exposing the same API.

mod http;
mod mock;
mod retry;

pub use http::HttpGazetteService;
pub use mock::{LatencyProfile, MockGazetteService};

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    ArchiveYearSummary, DashboardStats, Institution, JournalIssue, OfficialText, PagedResult,
    SearchFilter,
};

/// Read operations over the gazette.
///
/// Single-record lookups return `Ok(None)` for a missing id; only transport or
/// upstream failures are errors.
#[async_trait]
pub trait GazetteService: Send + Sync {
    async fn list_issues(&self, filter: &SearchFilter)
        -> Result<PagedResult<JournalIssue>, AppError>;

    async fn get_issue(&self, id: u32) -> Result<Option<JournalIssue>, AppError>;

    async fn texts_for_issue(&self, journal_id: u32) -> Result<Vec<OfficialText>, AppError>;

    async fn list_texts(&self, filter: &SearchFilter)
        -> Result<PagedResult<OfficialText>, AppError>;

    async fn get_text(&self, id: u32) -> Result<Option<OfficialText>, AppError>;

    async fn list_institutions(&self) -> Result<Vec<Institution>, AppError>;

    async fn archives(&self) -> Result<Vec<ArchiveYearSummary>, AppError>;

    async fn issues_for_year(&self, year: i32) -> Result<Vec<JournalIssue>, AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
}

/// Shared handle used in the application state.
pub type ServiceState = Arc<dyn GazetteService>;
