//! Project models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::NEUTRAL_COLOR;

/// A building project from quote to delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Human-facing key (e.g., "26-0142")
    pub number: String,
    pub name: String,
    pub dealer_id: Option<Uuid>,
    pub factory_id: Option<Uuid>,
    pub status: ProjectStatus,
    pub contract_value: Option<Decimal>,
    /// Scheduled first day on the production line
    pub production_start: Option<NaiveDate>,
    /// Scheduled delivery to the site
    pub delivery_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Quoting,
    Contracted,
    InProduction,
    Delivered,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Quoting => "quoting",
            ProjectStatus::Contracted => "contracted",
            ProjectStatus::InProduction => "in_production",
            ProjectStatus::Delivered => "delivered",
            ProjectStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "quoting" => Some(ProjectStatus::Quoting),
            "contracted" => Some(ProjectStatus::Contracted),
            "in_production" => Some(ProjectStatus::InProduction),
            "delivered" => Some(ProjectStatus::Delivered),
            "closed" => Some(ProjectStatus::Closed),
            _ => None,
        }
    }

    /// Active projects appear on dashboards and calendars
    pub fn is_active(&self) -> bool {
        !matches!(self, ProjectStatus::Delivered | ProjectStatus::Closed)
    }

    /// Display fill color for this status
    pub fn color(&self) -> &'static str {
        match self {
            ProjectStatus::Quoting => "#B0BEC5",
            ProjectStatus::Contracted => "#64B5F6",
            ProjectStatus::InProduction => "#FFB74D",
            ProjectStatus::Delivered => "#81C784",
            ProjectStatus::Closed => NEUTRAL_COLOR,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Quoting => write!(f, "Quoting"),
            ProjectStatus::Contracted => write!(f, "Contracted"),
            ProjectStatus::InProduction => write!(f, "In Production"),
            ProjectStatus::Delivered => write!(f, "Delivered"),
            ProjectStatus::Closed => write!(f, "Closed"),
        }
    }
}
