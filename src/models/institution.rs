//! Issuing institution model.

use serde::{Deserialize, Serialize};

/// An institution that signs and issues official texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    /// Protocol order used when listing institutions
    pub order: u32,
}
