//! Factory and factory contact models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A manufacturing plant that builds modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factory {
    pub id: Uuid,
    pub name: String,
    /// Short uppercase identifier (e.g., "BLD1")
    pub code: String,
    pub location: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A person working at a factory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryContact {
    pub id: Uuid,
    pub factory_id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
