//! Official text model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Institution, PublicationStatus};
use crate::errors::AppError;

/// Classification of a legal instrument.
///
/// Serialized with the gazette's own labels (`Loi`, `Décret`, ...); the
/// English names are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextType {
    #[serde(rename = "Loi", alias = "Law")]
    Law,
    #[serde(rename = "Décret", alias = "Decree")]
    Decree,
    #[serde(rename = "Arrêté", alias = "Order")]
    Order,
    #[serde(rename = "Ordonnance", alias = "Ordinance")]
    Ordinance,
    Constitution,
    #[serde(rename = "Circulaire", alias = "Circular")]
    Circular,
    #[serde(rename = "Décision", alias = "Decision")]
    Decision,
    #[serde(rename = "Nomination", alias = "Appointment")]
    Appointment,
}

impl TextType {
    pub const ALL: [TextType; 8] = [
        TextType::Law,
        TextType::Decree,
        TextType::Order,
        TextType::Ordinance,
        TextType::Constitution,
        TextType::Circular,
        TextType::Decision,
        TextType::Appointment,
    ];

    /// Gazette label, as used on the wire and in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextType::Law => "Loi",
            TextType::Decree => "Décret",
            TextType::Order => "Arrêté",
            TextType::Ordinance => "Ordonnance",
            TextType::Constitution => "Constitution",
            TextType::Circular => "Circulaire",
            TextType::Decision => "Décision",
            TextType::Appointment => "Nomination",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            TextType::Law => "Law",
            TextType::Decree => "Decree",
            TextType::Order => "Order",
            TextType::Ordinance => "Ordinance",
            TextType::Constitution => "Constitution",
            TextType::Circular => "Circular",
            TextType::Decision => "Decision",
            TextType::Appointment => "Appointment",
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextType::ALL
            .into_iter()
            .find(|t| t.as_str() == s || t.english_name() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown text type '{}'", s)))
    }
}

/// A single legal instrument published in the gazette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialText {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub text_type: TextType,
    /// Identifying number, e.g. `007/2025`
    pub number: String,
    pub signature_date: NaiveDate,
    pub publication_date: NaiveDate,
    pub summary: String,
    pub body: String,
    /// Denormalized copy of the issuing institution
    pub institution: Institution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub status: PublicationStatus,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Legal subject area, e.g. `Droit fiscal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
