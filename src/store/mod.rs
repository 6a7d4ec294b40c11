//! In-memory record store.
//!
//! Records are loaded once from a JSON seed at startup and never mutated.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Institution, JournalIssue, OfficialText, PublicationStatus, TextType};

/// Seed dataset embedded in the binary.
const FIXTURES: &str = include_str!("fixtures.json");

/// Raw seed document. Texts reference their institution by id; the store
/// embeds a copy of the institution when loading.
#[derive(Debug, Deserialize)]
struct Seed {
    institutions: Vec<Institution>,
    issues: Vec<JournalIssue>,
    texts: Vec<TextSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextSeed {
    id: u32,
    title: String,
    #[serde(rename = "type")]
    text_type: TextType,
    number: String,
    signature_date: NaiveDate,
    publication_date: NaiveDate,
    summary: String,
    body: String,
    institution_id: u32,
    #[serde(default)]
    journal_id: Option<u32>,
    #[serde(default)]
    pdf_url: Option<String>,
    status: PublicationStatus,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    subject_area: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Read-only collections of gazette records, in seed order.
#[derive(Debug, Clone)]
pub struct RecordStore {
    institutions: Vec<Institution>,
    issues: Vec<JournalIssue>,
    texts: Vec<OfficialText>,
}

impl RecordStore {
    /// Load the embedded seed dataset.
    pub fn from_fixtures() -> Result<Self, AppError> {
        Self::from_json(FIXTURES)
    }

    /// Load a seed document, checking referential integrity.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let seed: Seed = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid seed data: {}", e)))?;

        let institutions_by_id: HashMap<u32, &Institution> =
            seed.institutions.iter().map(|i| (i.id, i)).collect();
        let issues_by_id: HashMap<u32, &JournalIssue> =
            seed.issues.iter().map(|j| (j.id, j)).collect();

        if institutions_by_id.len() != seed.institutions.len() {
            return Err(AppError::Internal("Duplicate institution id in seed".to_string()));
        }
        if issues_by_id.len() != seed.issues.len() {
            return Err(AppError::Internal("Duplicate journal issue id in seed".to_string()));
        }

        for issue in &seed.issues {
            if issue.year != issue.publication_date.year() {
                return Err(AppError::Internal(format!(
                    "Journal issue {} has year {} but is dated {}",
                    issue.id, issue.year, issue.publication_date
                )));
            }
        }

        let mut texts = Vec::with_capacity(seed.texts.len());
        for text in seed.texts {
            let institution = institutions_by_id
                .get(&text.institution_id)
                .map(|i| (*i).clone())
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "Text {} references unknown institution {}",
                        text.id, text.institution_id
                    ))
                })?;

            let journal_number = match text.journal_id {
                Some(journal_id) => Some(
                    issues_by_id
                        .get(&journal_id)
                        .map(|j| j.number.clone())
                        .ok_or_else(|| {
                            AppError::Internal(format!(
                                "Text {} references unknown journal issue {}",
                                text.id, journal_id
                            ))
                        })?,
                ),
                None => None,
            };

            texts.push(OfficialText {
                id: text.id,
                title: text.title,
                text_type: text.text_type,
                number: text.number,
                signature_date: text.signature_date,
                publication_date: text.publication_date,
                summary: text.summary,
                body: text.body,
                institution,
                journal_id: text.journal_id,
                journal_number,
                pdf_url: text.pdf_url,
                status: text.status,
                keywords: text.keywords,
                subject_area: text.subject_area,
                created_at: text.created_at,
                updated_at: text.updated_at,
            });
        }

        tracing::debug!(
            institutions = seed.institutions.len(),
            issues = seed.issues.len(),
            texts = texts.len(),
            "Record store loaded"
        );

        Ok(Self {
            institutions: seed.institutions,
            issues: seed.issues,
            texts,
        })
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn issues(&self) -> &[JournalIssue] {
        &self.issues
    }

    pub fn texts(&self) -> &[OfficialText] {
        &self.texts
    }
}
