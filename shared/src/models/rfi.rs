//! Request-for-information models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::NEUTRAL_COLOR;

/// A request for information on a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfi {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Sequence within the project (e.g., "RFI-012")
    pub number: String,
    pub subject: String,
    pub question: String,
    pub answer: Option<String>,
    pub status: RfiStatus,
    pub due_date: Option<NaiveDate>,
    pub asked_by: Option<String>,
    pub answered_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of an RFI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RfiStatus {
    Open,
    Answered,
    Closed,
}

impl RfiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RfiStatus::Open => "open",
            RfiStatus::Answered => "answered",
            RfiStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(RfiStatus::Open),
            "answered" => Some(RfiStatus::Answered),
            "closed" => Some(RfiStatus::Closed),
            _ => None,
        }
    }

    /// Answered and closed RFIs never count as overdue
    pub fn is_closed(&self) -> bool {
        matches!(self, RfiStatus::Answered | RfiStatus::Closed)
    }

    /// Display fill color for this status
    pub fn color(&self) -> &'static str {
        match self {
            RfiStatus::Open => "#64B5F6",
            RfiStatus::Answered => "#81C784",
            RfiStatus::Closed => NEUTRAL_COLOR,
        }
    }
}

impl std::fmt::Display for RfiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RfiStatus::Open => write!(f, "Open"),
            RfiStatus::Answered => write!(f, "Answered"),
            RfiStatus::Closed => write!(f, "Closed"),
        }
    }
}
