//! Remote data source speaking to a backend that exposes the gazette API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::retry::retry_send;
use super::GazetteService;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{
    ArchiveYearSummary, DashboardStats, Institution, JournalIssue, OfficialText, PagedResult,
    SearchFilter,
};

/// Success envelope returned by the backend.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// HTTP client for a gazette backend, e.g. `http://localhost:8000/api`.
#[derive(Debug, Clone)]
pub struct HttpGazetteService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGazetteService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a resource; `Ok(None)` when the backend answers 404.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let resp = retry_send(|| self.http.get(&url).send()).await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = match resp.json::<ErrorResponse>().await {
                Ok(body) => format!("{}: {}", body.error.code, body.error.message),
                Err(_) => status.to_string(),
            };
            return Err(AppError::Upstream(format!(
                "GET {} returned {}: {}",
                path,
                status.as_u16(),
                message
            )));
        }

        let envelope: Envelope<T> = resp.json().await.map_err(|e| {
            AppError::Upstream(format!("GET {} returned an unreadable body: {}", path, e))
        })?;
        Ok(Some(envelope.data))
    }

    /// GET a collection resource, where 404 is unexpected.
    async fn fetch_required<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.fetch(path)
            .await?
            .ok_or_else(|| AppError::Upstream(format!("GET {} returned 404", path)))
    }
}

#[async_trait]
impl GazetteService for HttpGazetteService {
    async fn list_issues(
        &self,
        filter: &SearchFilter,
    ) -> Result<PagedResult<JournalIssue>, AppError> {
        self.fetch_required(&format!("/journaux?{}", filter.to_query_string()))
            .await
    }

    async fn get_issue(&self, id: u32) -> Result<Option<JournalIssue>, AppError> {
        self.fetch(&format!("/journaux/{}", id)).await
    }

    async fn texts_for_issue(&self, journal_id: u32) -> Result<Vec<OfficialText>, AppError> {
        self.fetch_required(&format!("/journaux/{}/textes", journal_id))
            .await
    }

    async fn list_texts(
        &self,
        filter: &SearchFilter,
    ) -> Result<PagedResult<OfficialText>, AppError> {
        self.fetch_required(&format!("/textes?{}", filter.to_query_string()))
            .await
    }

    async fn get_text(&self, id: u32) -> Result<Option<OfficialText>, AppError> {
        self.fetch(&format!("/textes/{}", id)).await
    }

    async fn list_institutions(&self) -> Result<Vec<Institution>, AppError> {
        self.fetch_required("/institutions").await
    }

    async fn archives(&self) -> Result<Vec<ArchiveYearSummary>, AppError> {
        self.fetch_required("/archives").await
    }

    async fn issues_for_year(&self, year: i32) -> Result<Vec<JournalIssue>, AppError> {
        self.fetch_required(&format!("/archives/{}", year)).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        self.fetch_required("/statistiques").await
    }
}
