//! File attachment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for a file bound to a parent record
///
/// Content bytes live in the database row and are fetched only on download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: Uuid,
    pub parent_kind: AttachmentParentKind,
    pub parent_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub byte_size: i64,
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Record types an attachment can belong to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentParentKind {
    Project,
    Task,
    Submittal,
    Rfi,
}

impl AttachmentParentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentParentKind::Project => "project",
            AttachmentParentKind::Task => "task",
            AttachmentParentKind::Submittal => "submittal",
            AttachmentParentKind::Rfi => "rfi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "project" => Some(AttachmentParentKind::Project),
            "task" => Some(AttachmentParentKind::Task),
            "submittal" => Some(AttachmentParentKind::Submittal),
            "rfi" => Some(AttachmentParentKind::Rfi),
            _ => None,
        }
    }
}
