//! Query engine over the record store.
//!
//! Every function here is pure: the result depends only on the collection and
//! the filter. Results keep seed order so pagination is deterministic.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{
    ArchiveYearSummary, DashboardStats, JournalIssue, OfficialText, PagedResult, SearchFilter,
    TextType,
};
use crate::store::RecordStore;

/// Number of issues shown in the dashboard's "latest" panel.
const LATEST_ISSUES: usize = 3;

/// Number of texts shown in the dashboard's "latest" panel.
const LATEST_TEXTS: usize = 5;

/// Filter facets prepared once per query (lowercased needles, trimmed values).
#[derive(Debug, Default)]
pub struct Criteria {
    needle: Option<String>,
    text_type: Option<TextType>,
    institution_id: Option<u32>,
    year: Option<i32>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    subject_area: Option<String>,
    keyword: Option<String>,
}

impl Criteria {
    pub fn new(filter: &SearchFilter) -> Self {
        Self {
            needle: lowered(filter.free_text_query.as_deref()),
            text_type: filter.text_type,
            institution_id: filter.institution_id,
            year: filter.year,
            date_from: filter.date_from,
            date_to: filter.date_to,
            subject_area: lowered(filter.subject_area.as_deref()),
            keyword: lowered(filter.keywords.as_deref()),
        }
    }

    fn within_dates(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }
}

fn lowered(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// A record the query engine can filter.
pub trait Searchable {
    /// True when the record satisfies every facet it carries.
    fn matches(&self, criteria: &Criteria) -> bool;
}

impl Searchable for JournalIssue {
    // Issues carry no type, institution, subject or keyword facets.
    fn matches(&self, criteria: &Criteria) -> bool {
        if criteria.year.is_some_and(|year| self.year != year) {
            return false;
        }
        if !criteria.within_dates(self.publication_date) {
            return false;
        }
        if let Some(needle) = &criteria.needle {
            return contains_ci(&self.title, needle)
                || contains_ci(&self.summary, needle)
                || contains_ci(&self.number, needle);
        }
        true
    }
}

impl Searchable for OfficialText {
    fn matches(&self, criteria: &Criteria) -> bool {
        if criteria.text_type.is_some_and(|t| self.text_type != t) {
            return false;
        }
        if criteria
            .institution_id
            .is_some_and(|id| self.institution.id != id)
        {
            return false;
        }
        if criteria
            .year
            .is_some_and(|year| self.publication_date.year() != year)
        {
            return false;
        }
        if !criteria.within_dates(self.publication_date) {
            return false;
        }
        if let Some(subject) = &criteria.subject_area {
            match &self.subject_area {
                Some(own) if own.trim().to_lowercase() == *subject => {}
                _ => return false,
            }
        }
        if let Some(keyword) = &criteria.keyword {
            if !self.keywords.iter().any(|k| contains_ci(k, keyword)) {
                return false;
            }
        }
        if let Some(needle) = &criteria.needle {
            return contains_ci(&self.title, needle)
                || contains_ci(&self.summary, needle)
                || contains_ci(&self.number, needle)
                || self.keywords.iter().any(|k| contains_ci(k, needle));
        }
        true
    }
}

/// Filter a collection and cut out the requested page.
///
/// Out-of-range pages yield empty items with the correct totals.
pub fn search<T: Searchable + Clone>(records: &[T], filter: &SearchFilter) -> PagedResult<T> {
    let criteria = Criteria::new(filter);
    let page = filter.page();
    let page_size = filter.page_size();

    let filtered: Vec<&T> = records.iter().filter(|r| r.matches(&criteria)).collect();
    let total_count = filtered.len();
    let start = (page - 1).saturating_mul(page_size);

    let items = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PagedResult {
        items,
        total_count,
        page,
        page_size,
        total_pages: total_count.div_ceil(page_size),
    }
}

pub fn search_issues(issues: &[JournalIssue], filter: &SearchFilter) -> PagedResult<JournalIssue> {
    search(issues, filter)
}

pub fn search_texts(texts: &[OfficialText], filter: &SearchFilter) -> PagedResult<OfficialText> {
    search(texts, filter)
}

pub fn issue_by_id(issues: &[JournalIssue], id: u32) -> Option<&JournalIssue> {
    issues.iter().find(|j| j.id == id)
}

pub fn text_by_id(texts: &[OfficialText], id: u32) -> Option<&OfficialText> {
    texts.iter().find(|t| t.id == id)
}

/// Texts published in the given issue, unpaginated.
pub fn texts_for_issue(texts: &[OfficialText], journal_id: u32) -> Vec<OfficialText> {
    texts
        .iter()
        .filter(|t| t.journal_id == Some(journal_id))
        .cloned()
        .collect()
}

/// Issues of a single year, unpaginated.
pub fn issues_for_year(issues: &[JournalIssue], year: i32) -> Vec<JournalIssue> {
    issues.iter().filter(|j| j.year == year).cloned().collect()
}

/// Per-year issue and text counts, newest year first.
///
/// A year appears as soon as it has at least one issue or one text.
pub fn archive_summaries(
    issues: &[JournalIssue],
    texts: &[OfficialText],
) -> Vec<ArchiveYearSummary> {
    let mut by_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for issue in issues {
        by_year.entry(issue.year).or_default().0 += 1;
    }
    for text in texts {
        by_year.entry(text.publication_date.year()).or_default().1 += 1;
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, (issue_count, text_count))| ArchiveYearSummary {
            year,
            issue_count,
            text_count,
        })
        .collect()
}

/// Back-office overview; "this month" is the calendar month of `today`.
pub fn dashboard_stats(store: &RecordStore, today: NaiveDate) -> DashboardStats {
    let same_month =
        |date: NaiveDate| date.year() == today.year() && date.month() == today.month();

    let mut texts_by_type = BTreeMap::new();
    for text in store.texts() {
        *texts_by_type
            .entry(text.text_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    DashboardStats {
        total_issues: store.issues().len(),
        total_texts: store.texts().len(),
        total_institutions: store.institutions().len(),
        issues_this_month: store
            .issues()
            .iter()
            .filter(|j| same_month(j.publication_date))
            .count(),
        texts_this_month: store
            .texts()
            .iter()
            .filter(|t| same_month(t.publication_date))
            .count(),
        texts_by_type,
        latest_issues: store.issues().iter().take(LATEST_ISSUES).cloned().collect(),
        latest_texts: store.texts().iter().take(LATEST_TEXTS).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::from_fixtures().unwrap()
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> u32) -> Vec<u32> {
        items.iter().map(id).collect()
    }

    fn text_filter(edit: impl FnOnce(&mut SearchFilter)) -> SearchFilter {
        let mut filter = SearchFilter::default();
        edit(&mut filter);
        filter
    }

    #[test]
    fn test_texts_by_type_law() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.text_type = Some(TextType::Law)),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![1, 5]);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_free_text_matches_keyword() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.free_text_query = Some("mines".to_string())),
        );
        assert!(result.total_count >= 1);
        assert!(result.items.iter().any(|t| t.id == 1));
    }

    #[test]
    fn test_free_text_is_case_insensitive_and_matches_number() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.free_text_query = Some("  r.CONST.456 ".to_string())),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![8]);

        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.free_text_query = Some("SANTÉ".to_string())),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![3, 6]);
    }

    #[test]
    fn test_blank_free_text_matches_everything() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.free_text_query = Some("   ".to_string())),
        );
        assert_eq!(result.total_count, store.texts().len());
    }

    #[test]
    fn test_issues_by_year() {
        let store = store();
        let result = search_issues(store.issues(), &text_filter(|f| f.year = Some(2025)));
        assert_eq!(result.total_count, 4);
        assert_eq!(ids(&result.items, |j| j.id), vec![2, 3, 4, 5]);
        assert!(result.items.iter().all(|j| j.year == 2025));
    }

    #[test]
    fn test_issue_free_text_matches_number() {
        let store = store();
        let result = search_issues(
            store.issues(),
            &text_filter(|f| f.free_text_query = Some("jo-2026".to_string())),
        );
        assert_eq!(ids(&result.items, |j| j.id), vec![1]);
    }

    #[test]
    fn test_issue_search_ignores_text_only_facets() {
        let store = store();
        let result = search_issues(
            store.issues(),
            &text_filter(|f| {
                f.text_type = Some(TextType::Decree);
                f.institution_id = Some(4);
            }),
        );
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn test_issue_pagination() {
        let store = store();
        let result = search_issues(
            store.issues(),
            &text_filter(|f| {
                f.page = 2;
                f.page_size = 2;
            }),
        );
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_count, 5);
        assert_eq!(ids(&result.items, |j| j.id), vec![3, 4]);
    }

    #[test]
    fn test_last_partial_and_out_of_range_pages() {
        let store = store();
        let last = search_issues(
            store.issues(),
            &text_filter(|f| {
                f.page = 3;
                f.page_size = 2;
            }),
        );
        assert_eq!(ids(&last.items, |j| j.id), vec![5]);

        let beyond = search_issues(
            store.issues(),
            &text_filter(|f| {
                f.page = 9;
                f.page_size = 2;
            }),
        );
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 5);
        assert_eq!(beyond.total_pages, 3);
        assert_eq!(beyond.page, 9);
    }

    #[test]
    fn test_page_length_property() {
        let store = store();
        for page_size in 1..=9 {
            for page in 1..=10 {
                let filter = text_filter(|f| {
                    f.page = page;
                    f.page_size = page_size;
                });
                let result = search_texts(store.texts(), &filter);
                let skipped = (page - 1) * page_size;
                let expected = if skipped < result.total_count {
                    page_size.min(result.total_count - skipped)
                } else {
                    0
                };
                assert_eq!(result.items.len(), expected);
                assert_eq!(
                    result.total_pages,
                    (result.total_count as f64 / page_size as f64).ceil() as usize
                );
            }
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let store = store();
        let by_type = search_texts(
            store.texts(),
            &text_filter(|f| f.text_type = Some(TextType::Decree)),
        );
        let by_year = search_texts(store.texts(), &text_filter(|f| f.year = Some(2025)));
        let both = search_texts(
            store.texts(),
            &text_filter(|f| {
                f.text_type = Some(TextType::Decree);
                f.year = Some(2025);
            }),
        );

        let intersection: Vec<u32> = by_type
            .items
            .iter()
            .filter(|t| by_year.items.iter().any(|y| y.id == t.id))
            .map(|t| t.id)
            .collect();
        assert_eq!(ids(&both.items, |t| t.id), intersection);
        assert_eq!(intersection, vec![2, 6]);
    }

    #[test]
    fn test_institution_and_subject_area() {
        let store = store();
        let result = search_texts(store.texts(), &text_filter(|f| f.institution_id = Some(2)));
        assert_eq!(ids(&result.items, |t| t.id), vec![4, 6, 7]);

        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.subject_area = Some("droit FISCAL".to_string())),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![4, 5]);

        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.subject_area = Some("Droit".to_string())),
        );
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| {
                f.date_from = NaiveDate::from_ymd_opt(2025, 12, 5);
                f.date_to = NaiveDate::from_ymd_opt(2025, 12, 20);
            }),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![1, 2, 5, 6]);

        let result = search_issues(
            store.issues(),
            &text_filter(|f| f.date_from = NaiveDate::from_ymd_opt(2025, 12, 6)),
        );
        assert_eq!(ids(&result.items, |j| j.id), vec![1, 2]);
    }

    #[test]
    fn test_keywords_facet() {
        let store = store();
        let result = search_texts(
            store.texts(),
            &text_filter(|f| f.keywords = Some("SANT".to_string())),
        );
        assert_eq!(ids(&result.items, |t| t.id), vec![3, 6]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let store = store();
        let filter = text_filter(|f| {
            f.year = Some(2025);
            f.page_size = 3;
        });
        assert_eq!(
            search_texts(store.texts(), &filter),
            search_texts(store.texts(), &filter)
        );
    }

    #[test]
    fn test_lookups() {
        let store = store();
        assert_eq!(text_by_id(store.texts(), 4).map(|t| t.id), Some(4));
        assert!(text_by_id(store.texts(), 999).is_none());
        assert_eq!(issue_by_id(store.issues(), 1).map(|j| j.id), Some(1));
        assert!(issue_by_id(store.issues(), 0).is_none());
    }

    #[test]
    fn test_texts_for_issue() {
        let store = store();
        assert_eq!(ids(&texts_for_issue(store.texts(), 2), |t| t.id), vec![1, 5]);
        assert!(texts_for_issue(store.texts(), 77).is_empty());
    }

    #[test]
    fn test_issues_for_year() {
        let store = store();
        assert_eq!(ids(&issues_for_year(store.issues(), 2026), |j| j.id), vec![1]);
        assert!(issues_for_year(store.issues(), 2019).is_empty());
    }

    #[test]
    fn test_archive_summaries_follow_records() {
        let store = store();
        let archives = archive_summaries(store.issues(), store.texts());
        assert_eq!(
            archives,
            vec![
                ArchiveYearSummary {
                    year: 2026,
                    issue_count: 1,
                    text_count: 2
                },
                ArchiveYearSummary {
                    year: 2025,
                    issue_count: 4,
                    text_count: 6
                },
            ]
        );
    }

    #[test]
    fn test_dashboard_stats() {
        let store = store();
        let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let stats = dashboard_stats(&store, today);

        assert_eq!(stats.total_issues, 5);
        assert_eq!(stats.total_texts, 8);
        assert_eq!(stats.total_institutions, 6);
        assert_eq!(stats.issues_this_month, 1);
        assert_eq!(stats.texts_this_month, 2);
        assert_eq!(stats.texts_by_type.get("Loi"), Some(&2));
        assert_eq!(stats.texts_by_type.get("Décret"), Some(&2));
        assert_eq!(stats.texts_by_type.values().sum::<usize>(), 8);
        assert_eq!(ids(&stats.latest_issues, |j| j.id), vec![1, 2, 3]);
        assert_eq!(stats.latest_texts.len(), 5);
    }
}
