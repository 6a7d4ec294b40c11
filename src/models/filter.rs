//! Search filter and paged result types, with query-string encoding.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::TextType;
use crate::errors::AppError;

/// Default page size for generic listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size used by the public list pages.
pub const LIST_PAGE_SIZE: usize = 20;

/// Maximum page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Query-string keys understood by the portal.
pub mod params {
    pub const QUERY: &str = "q";
    pub const TYPE: &str = "type";
    pub const INSTITUTION: &str = "institution";
    pub const YEAR: &str = "annee";
    pub const SUBJECT_AREA: &str = "matiere";
    pub const DATE_FROM: &str = "date_debut";
    pub const DATE_TO: &str = "date_fin";
    pub const KEYWORDS: &str = "mots_cles";
    pub const PAGE: &str = "page";
    pub const LIMIT: &str = "limit";
}

/// Filter and pagination descriptor for issue and text searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_query: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<TextType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl SearchFilter {
    /// An empty filter on page 1 with the given page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            free_text_query: None,
            text_type: None,
            institution_id: None,
            year: None,
            date_from: None,
            date_to: None,
            subject_area: None,
            keywords: None,
            page: 1,
            page_size,
        }
    }

    /// Page number, never below 1.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size, defaulted when zero and capped at [`MAX_PAGE_SIZE`].
    pub fn page_size(&self) -> usize {
        match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }

    /// Clear every facet, keeping the page size.
    pub fn clear(&mut self) {
        *self = Self::with_page_size(self.page_size);
    }

    /// Decode a filter from a URL query string using the generic page size.
    pub fn from_query_string(query: &str) -> Result<Self, AppError> {
        Self::decode(query, DEFAULT_PAGE_SIZE)
    }

    /// Decode a filter from a URL query string.
    ///
    /// Empty values are treated as absent and unknown keys are ignored.
    /// Invalid `page`/`limit` values fall back to the defaults; any other
    /// malformed value is a validation error.
    pub fn decode(query: &str, default_page_size: usize) -> Result<Self, AppError> {
        let mut filter = Self::with_page_size(default_page_size);

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match &*key {
                params::QUERY => filter.free_text_query = Some(value.to_string()),
                params::TYPE => filter.text_type = Some(value.parse()?),
                params::INSTITUTION => filter.institution_id = Some(parse_param(&key, value)?),
                params::YEAR => filter.year = Some(parse_param(&key, value)?),
                params::SUBJECT_AREA => filter.subject_area = Some(value.to_string()),
                params::DATE_FROM => filter.date_from = Some(parse_param(&key, value)?),
                params::DATE_TO => filter.date_to = Some(parse_param(&key, value)?),
                params::KEYWORDS => filter.keywords = Some(value.to_string()),
                params::PAGE => {
                    if let Some(page) = value.parse::<usize>().ok().filter(|p| *p >= 1) {
                        filter.page = page;
                    }
                }
                params::LIMIT => {
                    if let Some(limit) = value.parse::<usize>().ok().filter(|l| *l >= 1) {
                        filter.page_size = limit.min(MAX_PAGE_SIZE);
                    }
                }
                other => tracing::debug!("Ignoring unknown query parameter '{}'", other),
            }
        }

        Ok(filter)
    }

    /// Encode the facets for the browser URL (no paging keys).
    pub fn to_search_params(&self) -> String {
        self.encode(false)
    }

    /// Encode the facets plus `page` and `limit`, for API requests.
    pub fn to_query_string(&self) -> String {
        self.encode(true)
    }

    fn encode(&self, include_paging: bool) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        if let Some(q) = non_blank(&self.free_text_query) {
            out.append_pair(params::QUERY, q);
        }
        if let Some(t) = self.text_type {
            out.append_pair(params::TYPE, t.as_str());
        }
        if let Some(id) = self.institution_id {
            out.append_pair(params::INSTITUTION, &id.to_string());
        }
        if let Some(year) = self.year {
            out.append_pair(params::YEAR, &year.to_string());
        }
        if let Some(subject) = non_blank(&self.subject_area) {
            out.append_pair(params::SUBJECT_AREA, subject);
        }
        if let Some(from) = self.date_from {
            out.append_pair(params::DATE_FROM, &from.to_string());
        }
        if let Some(to) = self.date_to {
            out.append_pair(params::DATE_TO, &to.to_string());
        }
        if let Some(keywords) = non_blank(&self.keywords) {
            out.append_pair(params::KEYWORDS, keywords);
        }
        if include_paging {
            out.append_pair(params::PAGE, &self.page().to_string());
            out.append_pair(params::LIMIT, &self.page_size().to_string());
        }

        out.finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid value '{}' for '{}'", value, key)))
}

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    /// Size of the filtered set, not of the page
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_facets() {
        let filter = SearchFilter::from_query_string(
            "q=code+minier&type=Loi&institution=3&annee=2025&matiere=Droit%20minier\
             &date_debut=2025-12-01&date_fin=2025-12-31&mots_cles=mines&page=2&limit=5",
        )
        .unwrap();

        assert_eq!(filter.free_text_query.as_deref(), Some("code minier"));
        assert_eq!(filter.text_type, Some(TextType::Law));
        assert_eq!(filter.institution_id, Some(3));
        assert_eq!(filter.year, Some(2025));
        assert_eq!(filter.subject_area.as_deref(), Some("Droit minier"));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2025, 12, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(filter.keywords.as_deref(), Some("mines"));
        assert_eq!(filter.page, 2);
        assert_eq!(filter.page_size, 5);
    }

    #[test]
    fn test_decode_accented_type() {
        let filter = SearchFilter::from_query_string("type=D%C3%A9cret").unwrap();
        assert_eq!(filter.text_type, Some(TextType::Decree));
    }

    #[test]
    fn test_decode_empty_and_unknown_keys() {
        let filter = SearchFilter::from_query_string("?q=&annee=&utm_source=mail").unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn test_decode_invalid_paging_falls_back() {
        let filter = SearchFilter::decode("page=0&limit=abc", LIST_PAGE_SIZE).unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, LIST_PAGE_SIZE);

        let filter = SearchFilter::from_query_string("page=-3&limit=5000").unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_decode_rejects_malformed_facets() {
        for query in [
            "type=Memo",
            "annee=deux-mille",
            "institution=PR",
            "date_debut=20-12-2025",
        ] {
            let err = SearchFilter::from_query_string(query).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{}", query);
        }
    }

    #[test]
    fn test_encode_then_decode_preserves_filter() {
        let mut filter = SearchFilter::with_page_size(LIST_PAGE_SIZE);
        filter.free_text_query = Some("marchés publics & co".to_string());
        filter.text_type = Some(TextType::Circular);
        filter.institution_id = Some(2);
        filter.year = Some(2026);
        filter.subject_area = Some("Marchés publics".to_string());
        filter.date_from = NaiveDate::from_ymd_opt(2026, 1, 1);
        filter.keywords = Some("passation".to_string());
        filter.page = 3;

        let decoded = SearchFilter::decode(&filter.to_query_string(), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(decoded, filter);
    }

    #[test]
    fn test_search_params_omit_paging() {
        let mut filter = SearchFilter::default();
        filter.year = Some(2025);
        filter.page = 4;
        assert_eq!(filter.to_search_params(), "annee=2025");
        assert_eq!(filter.to_query_string(), "annee=2025&page=4&limit=10");
    }

    #[test]
    fn test_blank_free_text_is_not_encoded() {
        let mut filter = SearchFilter::default();
        filter.free_text_query = Some("   ".to_string());
        assert_eq!(filter.to_search_params(), "");
    }

    #[test]
    fn test_normalized_paging() {
        let mut filter = SearchFilter::with_page_size(0);
        filter.page = 0;
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.page_size(), DEFAULT_PAGE_SIZE);
    }
}
