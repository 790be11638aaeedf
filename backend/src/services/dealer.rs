//! Dealer management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Dealer;
use shared::validation::{validate_email, validate_phone};

/// Dealer service for managing the dealer network
#[derive(Clone)]
pub struct DealerService {
    db: PgPool,
}

/// Database row for dealer data
#[derive(Debug, sqlx::FromRow)]
struct DealerRow {
    id: Uuid,
    name: String,
    region: Option<String>,
    contact_name: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DealerRow> for Dealer {
    fn from(row: DealerRow) -> Self {
        Dealer {
            id: row.id,
            name: row.name,
            region: row.region,
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a dealer
#[derive(Debug, Deserialize)]
pub struct CreateDealerInput {
    pub name: String,
    pub region: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Input for updating a dealer
#[derive(Debug, Deserialize)]
pub struct UpdateDealerInput {
    pub name: Option<String>,
    pub region: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl DealerService {
    /// Create a new DealerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all dealers, sorted by name
    pub async fn list_dealers(&self) -> AppResult<Vec<Dealer>> {
        let rows = sqlx::query_as::<_, DealerRow>(
            r#"
            SELECT id, name, region, contact_name, contact_email, contact_phone,
                   created_at, updated_at
            FROM dealers
            ORDER BY LOWER(name) ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Dealer::from).collect())
    }

    /// Get a dealer by ID
    pub async fn get_dealer(&self, dealer_id: Uuid) -> AppResult<Dealer> {
        let row = sqlx::query_as::<_, DealerRow>(
            r#"
            SELECT id, name, region, contact_name, contact_email, contact_phone,
                   created_at, updated_at
            FROM dealers
            WHERE id = $1
            "#,
        )
        .bind(dealer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Dealer".to_string()))?;

        Ok(row.into())
    }

    /// Create a new dealer
    pub async fn create_dealer(&self, input: CreateDealerInput) -> AppResult<Dealer> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Dealer name cannot be empty".to_string(),
            });
        }

        validate_dealer_contact(&input.contact_email, &input.contact_phone)?;

        // Check for duplicate name
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM dealers WHERE LOWER(name) = LOWER($1)",
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let row = sqlx::query_as::<_, DealerRow>(
            r#"
            INSERT INTO dealers (name, region, contact_name, contact_email, contact_phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, region, contact_name, contact_email, contact_phone,
                      created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.region)
        .bind(&input.contact_name)
        .bind(&input.contact_email)
        .bind(&input.contact_phone)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a dealer
    pub async fn update_dealer(
        &self,
        dealer_id: Uuid,
        input: UpdateDealerInput,
    ) -> AppResult<Dealer> {
        let existing = self.get_dealer(dealer_id).await?;

        validate_dealer_contact(&input.contact_email, &input.contact_phone)?;

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Dealer name cannot be empty".to_string(),
            });
        }
        let region = input.region.or(existing.region);
        let contact_name = input.contact_name.or(existing.contact_name);
        let contact_email = input.contact_email.or(existing.contact_email);
        let contact_phone = input.contact_phone.or(existing.contact_phone);

        let row = sqlx::query_as::<_, DealerRow>(
            r#"
            UPDATE dealers
            SET name = $1, region = $2, contact_name = $3, contact_email = $4,
                contact_phone = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, region, contact_name, contact_email, contact_phone,
                      created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&region)
        .bind(&contact_name)
        .bind(&contact_email)
        .bind(&contact_phone)
        .bind(dealer_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a dealer
    pub async fn delete_dealer(&self, dealer_id: Uuid) -> AppResult<()> {
        // Block deletion while projects reference this dealer
        let project_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE dealer_id = $1")
                .bind(dealer_id)
                .fetch_one(&self.db)
                .await?;

        if project_count > 0 {
            return Err(AppError::Validation {
                field: "dealer_id".to_string(),
                message: format!(
                    "Cannot delete dealer: {} projects are linked to it",
                    project_count
                ),
            });
        }

        let result = sqlx::query("DELETE FROM dealers WHERE id = $1")
            .bind(dealer_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Dealer".to_string()));
        }

        Ok(())
    }
}

fn validate_dealer_contact(
    email: &Option<String>,
    phone: &Option<String>,
) -> AppResult<()> {
    if let Some(email) = email {
        if let Err(msg) = validate_email(email) {
            return Err(AppError::Validation {
                field: "contact_email".to_string(),
                message: msg.to_string(),
            });
        }
    }
    if let Some(phone) = phone {
        if let Err(msg) = validate_phone(phone) {
            return Err(AppError::Validation {
                field: "contact_phone".to_string(),
                message: msg.to_string(),
            });
        }
    }
    Ok(())
}
