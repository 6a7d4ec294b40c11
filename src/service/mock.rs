//! Mock data source: the query engine behind a fixed artificial delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::GazetteService;
use crate::errors::AppError;
use crate::models::{
    ArchiveYearSummary, DashboardStats, Institution, JournalIssue, OfficialText, PagedResult,
    SearchFilter,
};
use crate::query;
use crate::store::RecordStore;

/// Artificial delay applied before each operation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Paged listings, per-issue and per-year lists
    pub listing: Duration,
    /// Single-record lookups
    pub lookup: Duration,
    pub archives: Duration,
    pub institutions: Duration,
    pub dashboard: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            listing: Duration::from_millis(200),
            lookup: Duration::from_millis(150),
            archives: Duration::from_millis(150),
            institutions: Duration::from_millis(100),
            dashboard: Duration::from_millis(300),
        }
    }
}

impl LatencyProfile {
    /// Same delay for every operation.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            listing: delay,
            lookup: delay,
            archives: delay,
            institutions: delay,
            dashboard: delay,
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }
}

/// In-memory data source. Never fails.
#[derive(Debug, Clone)]
pub struct MockGazetteService {
    store: Arc<RecordStore>,
    latency: LatencyProfile,
}

impl MockGazetteService {
    pub fn new(store: Arc<RecordStore>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
impl GazetteService for MockGazetteService {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_issues(
        &self,
        filter: &SearchFilter,
    ) -> Result<PagedResult<JournalIssue>, AppError> {
        self.delay(self.latency.listing).await;
        Ok(query::search_issues(self.store.issues(), filter))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_issue(&self, id: u32) -> Result<Option<JournalIssue>, AppError> {
        self.delay(self.latency.lookup).await;
        Ok(query::issue_by_id(self.store.issues(), id).cloned())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn texts_for_issue(&self, journal_id: u32) -> Result<Vec<OfficialText>, AppError> {
        self.delay(self.latency.listing).await;
        Ok(query::texts_for_issue(self.store.texts(), journal_id))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_texts(
        &self,
        filter: &SearchFilter,
    ) -> Result<PagedResult<OfficialText>, AppError> {
        self.delay(self.latency.listing).await;
        Ok(query::search_texts(self.store.texts(), filter))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_text(&self, id: u32) -> Result<Option<OfficialText>, AppError> {
        self.delay(self.latency.lookup).await;
        Ok(query::text_by_id(self.store.texts(), id).cloned())
    }

    async fn list_institutions(&self) -> Result<Vec<Institution>, AppError> {
        self.delay(self.latency.institutions).await;
        Ok(self.store.institutions().to_vec())
    }

    async fn archives(&self) -> Result<Vec<ArchiveYearSummary>, AppError> {
        self.delay(self.latency.archives).await;
        Ok(query::archive_summaries(
            self.store.issues(),
            self.store.texts(),
        ))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn issues_for_year(&self, year: i32) -> Result<Vec<JournalIssue>, AppError> {
        self.delay(self.latency.listing).await;
        Ok(query::issues_for_year(self.store.issues(), year))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        self.delay(self.latency.dashboard).await;
        Ok(query::dashboard_stats(
            &self.store,
            Utc::now().date_naive(),
        ))
    }
}
