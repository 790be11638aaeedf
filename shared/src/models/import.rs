//! Contact import log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one contact-list import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactImportLog {
    pub id: Uuid,
    pub filename: String,
    pub imported_count: i32,
    pub skipped_count: i32,
    /// One message per skipped row ("row 4: missing name")
    pub errors: Vec<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
