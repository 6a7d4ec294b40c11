//! List-page filter state.
//!
//! A [`ListView`] owns the current [`SearchFilter`] of one list page, decodes
//! it from the page URL on mount and encodes it back when the user submits.
//! Every change issues a new [`RequestToken`]; a response is applied only if
//! its token is still the latest, so a slow superseded query can never
//! overwrite a fresher result.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{JournalIssue, OfficialText, PagedResult, SearchFilter};
use crate::service::GazetteService;

/// Identifies one issued query. Tokens increase monotonically per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(PagedResult<T>),
    Failed(String),
}

/// Records that a list page can query.
#[async_trait]
pub trait Listing: Sized + Send {
    async fn fetch<S>(service: &S, filter: &SearchFilter) -> Result<PagedResult<Self>, AppError>
    where
        S: GazetteService + ?Sized;
}

#[async_trait]
impl Listing for JournalIssue {
    async fn fetch<S>(service: &S, filter: &SearchFilter) -> Result<PagedResult<Self>, AppError>
    where
        S: GazetteService + ?Sized,
    {
        service.list_issues(filter).await
    }
}

#[async_trait]
impl Listing for OfficialText {
    async fn fetch<S>(service: &S, filter: &SearchFilter) -> Result<PagedResult<Self>, AppError>
    where
        S: GazetteService + ?Sized,
    {
        service.list_texts(filter).await
    }
}

/// Filter state of a single list page.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    filter: SearchFilter,
    state: ViewState<T>,
    latest: u64,
}

impl<T: Listing> ListView<T> {
    /// Initialize from the page URL's query string and start the first query.
    ///
    /// A query string that cannot be decoded falls back to an empty filter.
    pub fn mount(query: &str, page_size: usize) -> (Self, RequestToken) {
        let filter = SearchFilter::decode(query, page_size).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable search parameters '{}': {}", query, e);
            SearchFilter::with_page_size(page_size)
        });

        let mut view = Self {
            filter,
            state: ViewState::Loading,
            latest: 0,
        };
        let token = view.begin();
        (view, token)
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Change one or more facets; the view goes back to page 1.
    pub fn edit(&mut self, change: impl FnOnce(&mut SearchFilter)) -> RequestToken {
        change(&mut self.filter);
        self.filter.page = 1;
        self.begin()
    }

    /// Move to another page, keeping the facets.
    pub fn set_page(&mut self, page: usize) -> RequestToken {
        self.filter.page = page.max(1);
        self.begin()
    }

    /// Clear every facet.
    pub fn reset(&mut self) -> RequestToken {
        self.filter.clear();
        self.begin()
    }

    /// Query string to write into the page URL on explicit submission.
    pub fn submit(&self) -> String {
        self.filter.to_search_params()
    }

    /// Apply the outcome of the query identified by `token`.
    ///
    /// Returns `false`, leaving the state untouched, when a newer query has
    /// been issued since.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<PagedResult<T>, AppError>,
    ) -> bool {
        if token.0 != self.latest {
            tracing::debug!(
                token = token.0,
                latest = self.latest,
                "Discarding stale list response"
            );
            return false;
        }

        self.state = match result {
            Ok(page) => ViewState::Ready(page),
            Err(e) => ViewState::Failed(e.message().to_string()),
        };
        true
    }

    /// Issue a query for the current filter and apply its result.
    pub async fn load<S>(&mut self, service: &S) -> bool
    where
        S: GazetteService + ?Sized,
    {
        let token = self.begin();
        let result = T::fetch(service, &self.filter).await;
        self.complete(token, result)
    }

    fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = ViewState::Loading;
        RequestToken(self.latest)
    }
}
