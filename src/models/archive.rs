//! Aggregate views: archive summaries and back-office statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{JournalIssue, OfficialText};

/// Per-year counts for the archive browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveYearSummary {
    pub year: i32,
    pub issue_count: usize,
    pub text_count: usize,
}

/// Overview shown on the back-office dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_issues: usize,
    pub total_texts: usize,
    pub total_institutions: usize,
    pub issues_this_month: usize,
    pub texts_this_month: usize,
    /// Text counts keyed by gazette type label
    pub texts_by_type: BTreeMap<String, usize>,
    pub latest_issues: Vec<JournalIssue>,
    pub latest_texts: Vec<OfficialText>,
}
