//! Submittal models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::NEUTRAL_COLOR;

/// A submittal package routed for approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submittal {
    pub id: Uuid,
    pub project_id: Uuid,
    /// Sequence within the project (e.g., "SUB-004")
    pub number: String,
    pub title: String,
    /// CSI-style spec section (e.g., "06 10 00")
    pub spec_section: Option<String>,
    pub status: SubmittalStatus,
    /// Revision 0 is the initial submission; resubmits increment
    pub revision: i32,
    pub due_date: Option<NaiveDate>,
    pub sent_date: Option<NaiveDate>,
    pub returned_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review status of a submittal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmittalStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    ApprovedAsNoted,
    ReviseResubmit,
    Rejected,
    Closed,
}

impl SubmittalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmittalStatus::Draft => "draft",
            SubmittalStatus::Submitted => "submitted",
            SubmittalStatus::UnderReview => "under_review",
            SubmittalStatus::Approved => "approved",
            SubmittalStatus::ApprovedAsNoted => "approved_as_noted",
            SubmittalStatus::ReviseResubmit => "revise_resubmit",
            SubmittalStatus::Rejected => "rejected",
            SubmittalStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(SubmittalStatus::Draft),
            "submitted" => Some(SubmittalStatus::Submitted),
            "under_review" => Some(SubmittalStatus::UnderReview),
            "approved" => Some(SubmittalStatus::Approved),
            "approved_as_noted" => Some(SubmittalStatus::ApprovedAsNoted),
            "revise_resubmit" => Some(SubmittalStatus::ReviseResubmit),
            "rejected" => Some(SubmittalStatus::Rejected),
            "closed" => Some(SubmittalStatus::Closed),
            _ => None,
        }
    }

    /// Closed submittals never count as overdue
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            SubmittalStatus::Approved | SubmittalStatus::ApprovedAsNoted | SubmittalStatus::Closed
        )
    }

    /// Only returned-for-correction submittals may be resubmitted
    pub fn can_resubmit(&self) -> bool {
        matches!(
            self,
            SubmittalStatus::ReviseResubmit | SubmittalStatus::Rejected
        )
    }

    /// Display fill color for this status
    pub fn color(&self) -> &'static str {
        match self {
            SubmittalStatus::Draft => "#B0BEC5",
            SubmittalStatus::Submitted => "#64B5F6",
            SubmittalStatus::UnderReview => "#FFD54F",
            SubmittalStatus::Approved => "#81C784",
            SubmittalStatus::ApprovedAsNoted => "#AED581",
            SubmittalStatus::ReviseResubmit => "#FFB74D",
            SubmittalStatus::Rejected => "#E57373",
            SubmittalStatus::Closed => NEUTRAL_COLOR,
        }
    }
}

impl std::fmt::Display for SubmittalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmittalStatus::Draft => write!(f, "Draft"),
            SubmittalStatus::Submitted => write!(f, "Submitted"),
            SubmittalStatus::UnderReview => write!(f, "Under Review"),
            SubmittalStatus::Approved => write!(f, "Approved"),
            SubmittalStatus::ApprovedAsNoted => write!(f, "Approved as Noted"),
            SubmittalStatus::ReviseResubmit => write!(f, "Revise & Resubmit"),
            SubmittalStatus::Rejected => write!(f, "Rejected"),
            SubmittalStatus::Closed => write!(f, "Closed"),
        }
    }
}
