//! Department models and keyword routing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A department within the manufacturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    /// Group mailbox for the department, if any
    pub email_alias: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Keyword to department routing table
///
/// First matching keyword wins; matching is whole-word, case-insensitive.
pub const DEPARTMENT_KEYWORDS: &[(&str, &str)] = &[
    ("drawing", "Drafting"),
    ("drawings", "Drafting"),
    ("draft", "Drafting"),
    ("blueprint", "Drafting"),
    ("permit", "Compliance"),
    ("inspection", "Compliance"),
    ("inspector", "Compliance"),
    ("electrical", "Electrical"),
    ("wiring", "Electrical"),
    ("breaker", "Electrical"),
    ("plumbing", "Plumbing"),
    ("pipe", "Plumbing"),
    ("fixture", "Plumbing"),
    ("hvac", "HVAC"),
    ("duct", "HVAC"),
    ("furnace", "HVAC"),
    ("transport", "Transportation"),
    ("delivery", "Transportation"),
    ("carrier", "Transportation"),
    ("crane", "Field Operations"),
    ("foundation", "Field Operations"),
    ("skirting", "Field Operations"),
    ("invoice", "Accounting"),
    ("payment", "Accounting"),
    ("billing", "Accounting"),
    ("quote", "Sales"),
    ("pricing", "Sales"),
    ("order", "Sales"),
];

/// Suggest a department from free text (e.g., a task title)
///
/// Splits the text into words and returns the department of the first word
/// found in the routing table. Returns None when no word matches.
pub fn suggest_department(text: &str) -> Option<&'static str> {
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let lower = word.to_lowercase();
        if let Some((_, dept)) = DEPARTMENT_KEYWORDS.iter().find(|(kw, _)| *kw == lower) {
            return Some(dept);
        }
    }
    None
}
