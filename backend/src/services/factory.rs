//! Factory management service for plants and their contacts

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Factory, FactoryContact};
use shared::validation::{validate_email, validate_factory_code, validate_phone};

/// Factory service for managing manufacturing plants
#[derive(Clone)]
pub struct FactoryService {
    db: PgPool,
}

/// Database row for factory data
#[derive(Debug, sqlx::FromRow)]
struct FactoryRow {
    id: Uuid,
    name: String,
    code: String,
    location: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FactoryRow> for Factory {
    fn from(row: FactoryRow) -> Self {
        Factory {
            id: row.id,
            name: row.name,
            code: row.code,
            location: row.location,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for factory contact data
#[derive(Debug, sqlx::FromRow)]
struct FactoryContactRow {
    id: Uuid,
    factory_id: Uuid,
    name: String,
    title: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FactoryContactRow> for FactoryContact {
    fn from(row: FactoryContactRow) -> Self {
        FactoryContact {
            id: row.id,
            factory_id: row.factory_id,
            name: row.name,
            title: row.title,
            email: row.email,
            phone: row.phone,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a factory
#[derive(Debug, Deserialize)]
pub struct CreateFactoryInput {
    pub name: String,
    pub code: String,
    pub location: Option<String>,
}

/// Input for updating a factory
#[derive(Debug, Deserialize)]
pub struct UpdateFactoryInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
}

/// Input for creating or updating a factory contact
#[derive(Debug, Deserialize)]
pub struct FactoryContactInput {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Factory contacts bucketed under their plant
#[derive(Debug, serde::Serialize)]
pub struct FactoryGroup {
    pub factory: Factory,
    pub contacts: Vec<FactoryContact>,
}

impl FactoryService {
    /// Create a new FactoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all factories, active plants first
    pub async fn list_factories(&self) -> AppResult<Vec<Factory>> {
        let rows = sqlx::query_as::<_, FactoryRow>(
            r#"
            SELECT id, name, code, location, active, created_at, updated_at
            FROM factories
            ORDER BY active DESC, code ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Factory::from).collect())
    }

    /// Get a factory by ID
    pub async fn get_factory(&self, factory_id: Uuid) -> AppResult<Factory> {
        let row = sqlx::query_as::<_, FactoryRow>(
            r#"
            SELECT id, name, code, location, active, created_at, updated_at
            FROM factories
            WHERE id = $1
            "#,
        )
        .bind(factory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Factory".to_string()))?;

        Ok(row.into())
    }

    /// Create a new factory
    pub async fn create_factory(&self, input: CreateFactoryInput) -> AppResult<Factory> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Factory name cannot be empty".to_string(),
            });
        }

        if let Err(msg) = validate_factory_code(&input.code) {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: msg.to_string(),
            });
        }

        // Check for duplicate code
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM factories WHERE code = $1")
                .bind(&input.code)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let row = sqlx::query_as::<_, FactoryRow>(
            r#"
            INSERT INTO factories (name, code, location)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, location, active, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.code)
        .bind(&input.location)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a factory
    pub async fn update_factory(
        &self,
        factory_id: Uuid,
        input: UpdateFactoryInput,
    ) -> AppResult<Factory> {
        let existing = self.get_factory(factory_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Factory name cannot be empty".to_string(),
            });
        }
        let location = input.location.or(existing.location);
        let active = input.active.unwrap_or(existing.active);

        let row = sqlx::query_as::<_, FactoryRow>(
            r#"
            UPDATE factories
            SET name = $1, location = $2, active = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, code, location, active, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&location)
        .bind(active)
        .bind(factory_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a factory
    pub async fn delete_factory(&self, factory_id: Uuid) -> AppResult<()> {
        // Block deletion while projects reference this plant
        let project_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE factory_id = $1")
                .bind(factory_id)
                .fetch_one(&self.db)
                .await?;

        if project_count > 0 {
            return Err(AppError::Validation {
                field: "factory_id".to_string(),
                message: format!(
                    "Cannot delete factory: {} projects are linked to it",
                    project_count
                ),
            });
        }

        let result = sqlx::query("DELETE FROM factories WHERE id = $1")
            .bind(factory_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Factory".to_string()));
        }

        Ok(())
    }

    /// Get all contacts at a factory, sorted by name
    pub async fn list_factory_contacts(&self, factory_id: Uuid) -> AppResult<Vec<FactoryContact>> {
        let rows = sqlx::query_as::<_, FactoryContactRow>(
            r#"
            SELECT id, factory_id, name, title, email, phone, notes, created_at, updated_at
            FROM factory_contacts
            WHERE factory_id = $1
            ORDER BY LOWER(name) ASC
            "#,
        )
        .bind(factory_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(FactoryContact::from).collect())
    }

    /// Add a contact to a factory
    pub async fn create_factory_contact(
        &self,
        factory_id: Uuid,
        input: FactoryContactInput,
    ) -> AppResult<FactoryContact> {
        validate_contact_input(&input)?;

        // Check factory exists
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM factories WHERE id = $1")
            .bind(factory_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Factory".to_string()));
        }

        let row = sqlx::query_as::<_, FactoryContactRow>(
            r#"
            INSERT INTO factory_contacts (factory_id, name, title, email, phone, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, factory_id, name, title, email, phone, notes, created_at, updated_at
            "#,
        )
        .bind(factory_id)
        .bind(&input.name)
        .bind(&input.title)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a factory contact
    pub async fn update_factory_contact(
        &self,
        factory_id: Uuid,
        contact_id: Uuid,
        input: FactoryContactInput,
    ) -> AppResult<FactoryContact> {
        validate_contact_input(&input)?;

        let row = sqlx::query_as::<_, FactoryContactRow>(
            r#"
            UPDATE factory_contacts
            SET name = $1, title = $2, email = $3, phone = $4, notes = $5, updated_at = NOW()
            WHERE id = $6 AND factory_id = $7
            RETURNING id, factory_id, name, title, email, phone, notes, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.title)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.notes)
        .bind(contact_id)
        .bind(factory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Factory contact".to_string()))?;

        Ok(row.into())
    }

    /// Get factory contacts grouped under their plant
    ///
    /// Every contact lands in exactly one bucket; factories with no contacts
    /// still appear with an empty list.
    pub async fn group_contacts_by_factory(&self) -> AppResult<Vec<FactoryGroup>> {
        let factories = sqlx::query_as::<_, FactoryRow>(
            r#"
            SELECT id, name, code, location, active, created_at, updated_at
            FROM factories
            ORDER BY active DESC, code ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let contacts = sqlx::query_as::<_, FactoryContactRow>(
            r#"
            SELECT id, factory_id, name, title, email, phone, notes, created_at, updated_at
            FROM factory_contacts
            ORDER BY LOWER(name) ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut groups: Vec<FactoryGroup> = factories
            .into_iter()
            .map(|row| FactoryGroup {
                factory: row.into(),
                contacts: Vec::new(),
            })
            .collect();

        for row in contacts {
            let contact: FactoryContact = row.into();
            if let Some(group) = groups
                .iter_mut()
                .find(|g| g.factory.id == contact.factory_id)
            {
                group.contacts.push(contact);
            }
        }

        Ok(groups)
    }

    /// Remove a contact from a factory
    pub async fn delete_factory_contact(
        &self,
        factory_id: Uuid,
        contact_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM factory_contacts WHERE id = $1 AND factory_id = $2")
            .bind(contact_id)
            .bind(factory_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Factory contact".to_string()));
        }

        Ok(())
    }
}

fn validate_contact_input(input: &FactoryContactInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Contact name cannot be empty".to_string(),
        });
    }

    if let Some(ref email) = input.email {
        if let Err(msg) = validate_email(email) {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            });
        }
    }

    if let Some(ref phone) = input.phone {
        if let Err(msg) = validate_phone(phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
            });
        }
    }

    Ok(())
}
