//! Journal issue model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Editorial status shared by journal issues and official texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    InReview,
    Published,
    Archived,
}

/// One published edition of the Official Gazette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalIssue {
    pub id: u32,
    /// Issue identifier, e.g. `JO-2025-024`
    pub number: String,
    pub publication_date: NaiveDate,
    pub year: i32,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub status: PublicationStatus,
    /// Number of texts announced in the issue's table of contents
    pub text_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
