//! Contact models and the merged contact view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An external contact in the company directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryContact {
    pub id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: ContactCategory,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category of a directory contact
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactCategory {
    Dealer,
    Vendor,
    Engineer,
    Inspector,
    Other,
}

impl ContactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactCategory::Dealer => "dealer",
            ContactCategory::Vendor => "vendor",
            ContactCategory::Engineer => "engineer",
            ContactCategory::Inspector => "inspector",
            ContactCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dealer" => Some(ContactCategory::Dealer),
            "vendor" => Some(ContactCategory::Vendor),
            "engineer" => Some(ContactCategory::Engineer),
            "inspector" => Some(ContactCategory::Inspector),
            "other" => Some(ContactCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactCategory::Dealer => write!(f, "Dealer"),
            ContactCategory::Vendor => write!(f, "Vendor"),
            ContactCategory::Engineer => write!(f, "Engineer"),
            ContactCategory::Inspector => write!(f, "Inspector"),
            ContactCategory::Other => write!(f, "Other"),
        }
    }
}

/// Source a merged contact came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    User,
    Factory,
    Directory,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::User => "user",
            ContactKind::Factory => "factory",
            ContactKind::Directory => "directory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ContactKind::User),
            "factory" => Some(ContactKind::Factory),
            "directory" => Some(ContactKind::Directory),
            _ => None,
        }
    }
}

/// One entry in the merged contact list
///
/// Heterogeneous sources (users, factory contacts, directory contacts)
/// collapse into this shape for assignment dropdowns and the combined
/// directory view. `kind` + `id` identify the source row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Company for directory contacts, factory name for factory contacts
    pub company: Option<String>,
}

/// Reference to a contact stored on another record (e.g., task assignee)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRef {
    pub kind: ContactKind,
    pub id: Uuid,
    pub name: String,
}

/// Sort contacts by name, case-insensitive; ties keep insertion order
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
