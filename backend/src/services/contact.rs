//! Contact directory service
//!
//! Serves three record sources: user accounts, factory contacts, and the
//! external directory. The merged view collapses users and factory contacts
//! into one assignable list for dropdowns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    sort_contacts, Contact, ContactCategory, ContactImportLog, ContactKind, DirectoryContact,
};
use shared::validation::{validate_email, validate_phone};

/// Contact service for the company directory and merged contact views
#[derive(Clone)]
pub struct ContactService {
    db: PgPool,
}

/// Database row for directory contact data
#[derive(Debug, sqlx::FromRow)]
struct DirectoryContactRow {
    id: Uuid,
    name: String,
    company: Option<String>,
    title: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    category: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DirectoryContactRow> for DirectoryContact {
    fn from(row: DirectoryContactRow) -> Self {
        DirectoryContact {
            id: row.id,
            name: row.name,
            company: row.company,
            title: row.title,
            email: row.email,
            phone: row.phone,
            category: ContactCategory::from_str(&row.category).unwrap_or(ContactCategory::Other),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a directory contact
#[derive(Debug, Deserialize)]
pub struct CreateContactInput {
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Input for updating a directory contact
#[derive(Debug, Deserialize)]
pub struct UpdateContactInput {
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Filter parameters for listing directory contacts
#[derive(Debug, Default, Deserialize)]
pub struct ContactFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Directory contacts bucketed by category
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category: ContactCategory,
    pub contacts: Vec<DirectoryContact>,
}

impl ContactService {
    /// Create a new ContactService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Directory contacts
    // ========================================================================

    /// Get directory contacts with optional category and search filters
    pub async fn list_directory_contacts(
        &self,
        filter: ContactFilter,
    ) -> AppResult<Vec<DirectoryContact>> {
        if let Some(ref category) = filter.category {
            if ContactCategory::from_str(category).is_none() {
                return Err(AppError::Validation {
                    field: "category".to_string(),
                    message: format!("Unknown contact category: {}", category),
                });
            }
        }

        let rows = sqlx::query_as::<_, DirectoryContactRow>(
            r#"
            SELECT id, name, company, title, email, phone, category, notes,
                   created_at, updated_at
            FROM directory_contacts
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR company ILIKE '%' || $2 || '%')
            ORDER BY LOWER(name) ASC
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.search)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DirectoryContact::from).collect())
    }

    /// Get a directory contact by ID
    pub async fn get_directory_contact(&self, contact_id: Uuid) -> AppResult<DirectoryContact> {
        let row = sqlx::query_as::<_, DirectoryContactRow>(
            r#"
            SELECT id, name, company, title, email, phone, category, notes,
                   created_at, updated_at
            FROM directory_contacts
            WHERE id = $1
            "#,
        )
        .bind(contact_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        Ok(row.into())
    }

    /// Create a new directory contact
    pub async fn create_directory_contact(
        &self,
        input: CreateContactInput,
    ) -> AppResult<DirectoryContact> {
        let category = parse_category(input.category.as_deref())?;
        validate_contact_fields(&input.name, &input.email, &input.phone)?;

        let row = sqlx::query_as::<_, DirectoryContactRow>(
            r#"
            INSERT INTO directory_contacts (name, company, title, email, phone, category, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, company, title, email, phone, category, notes,
                      created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(category.as_str())
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a directory contact
    pub async fn update_directory_contact(
        &self,
        contact_id: Uuid,
        input: UpdateContactInput,
    ) -> AppResult<DirectoryContact> {
        let existing = self.get_directory_contact(contact_id).await?;

        let category = match input.category.as_deref() {
            Some(s) => parse_category(Some(s))?,
            None => existing.category,
        };
        let name = input.name.unwrap_or(existing.name);
        let company = input.company.or(existing.company);
        let title = input.title.or(existing.title);
        let email = input.email.or(existing.email);
        let phone = input.phone.or(existing.phone);
        let notes = input.notes.or(existing.notes);

        validate_contact_fields(&name, &email, &phone)?;

        let row = sqlx::query_as::<_, DirectoryContactRow>(
            r#"
            UPDATE directory_contacts
            SET name = $1, company = $2, title = $3, email = $4, phone = $5,
                category = $6, notes = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING id, name, company, title, email, phone, category, notes,
                      created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&company)
        .bind(&title)
        .bind(&email)
        .bind(&phone)
        .bind(category.as_str())
        .bind(&notes)
        .bind(contact_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a directory contact
    pub async fn delete_directory_contact(&self, contact_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM directory_contacts WHERE id = $1")
            .bind(contact_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Contact".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // Merged and grouped views
    // ========================================================================

    /// Get the merged assignable-contact list: user accounts plus factory
    /// contacts, sorted by name
    pub async fn list_assignable_contacts(&self) -> AppResult<Vec<Contact>> {
        let users = sqlx::query_as::<_, (Uuid, String, Option<String>, String, Option<String>)>(
            r#"
            SELECT id, name, title, email, phone
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let factory_contacts =
            sqlx::query_as::<_, (Uuid, String, Option<String>, Option<String>, Option<String>, String)>(
                r#"
                SELECT fc.id, fc.name, fc.title, fc.email, fc.phone, f.name AS factory_name
                FROM factory_contacts fc
                JOIN factories f ON f.id = fc.factory_id
                WHERE f.active = TRUE
                "#,
            )
            .fetch_all(&self.db)
            .await?;

        let mut contacts: Vec<Contact> = Vec::with_capacity(users.len() + factory_contacts.len());

        for (id, name, title, email, phone) in users {
            contacts.push(Contact {
                kind: ContactKind::User,
                id,
                name,
                title,
                email: Some(email),
                phone,
                company: None,
            });
        }

        for (id, name, title, email, phone, factory_name) in factory_contacts {
            contacts.push(Contact {
                kind: ContactKind::Factory,
                id,
                name,
                title,
                email,
                phone,
                company: Some(factory_name),
            });
        }

        sort_contacts(&mut contacts);
        Ok(contacts)
    }

    /// Get directory contacts grouped by category
    ///
    /// Every contact lands in exactly one bucket; buckets appear in fixed
    /// category order, empty ones included.
    pub async fn group_directory_by_category(&self) -> AppResult<Vec<CategoryGroup>> {
        let contacts = self.list_directory_contacts(ContactFilter::default()).await?;

        let categories = [
            ContactCategory::Dealer,
            ContactCategory::Vendor,
            ContactCategory::Engineer,
            ContactCategory::Inspector,
            ContactCategory::Other,
        ];

        let mut groups: Vec<CategoryGroup> = categories
            .iter()
            .map(|&category| CategoryGroup {
                category,
                contacts: Vec::new(),
            })
            .collect();

        for contact in contacts {
            // Unmatched categories land in the trailing Other bucket
            let idx = groups
                .iter()
                .position(|g| g.category == contact.category)
                .unwrap_or(groups.len() - 1);
            groups[idx].contacts.push(contact);
        }

        Ok(groups)
    }

    // ========================================================================
    // CSV import and export
    // ========================================================================

    /// Import directory contacts from a CSV file
    ///
    /// Expected header: name, company, title, email, phone, category, notes.
    /// Rows missing a name or carrying an invalid email/phone are skipped and
    /// reported; unknown categories fall back to "other". Valid rows and the
    /// import log commit together.
    pub async fn import_contacts(
        &self,
        filename: &str,
        data: &[u8],
        created_by: Option<String>,
    ) -> AppResult<ContactImportLog> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut valid_rows: Vec<ImportRow> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
            // Header occupies line 1
            let line = index + 2;
            match result {
                Ok(row) => match validate_import_row(&row) {
                    Ok(()) => valid_rows.push(row),
                    Err(reason) => errors.push(format!("row {}: {}", line, reason)),
                },
                Err(e) => errors.push(format!("row {}: {}", line, e)),
            }
        }

        let imported_count = valid_rows.len() as i32;
        let skipped_count = errors.len() as i32;

        let mut tx = self.db.begin().await?;

        for row in &valid_rows {
            let category = row
                .category
                .as_deref()
                .and_then(ContactCategory::from_str)
                .unwrap_or(ContactCategory::Other);

            sqlx::query(
                r#"
                INSERT INTO directory_contacts (name, company, title, email, phone, category, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&row.name)
            .bind(&row.company)
            .bind(&row.title)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(category.as_str())
            .bind(&row.notes)
            .execute(&mut *tx)
            .await?;
        }

        let log_row = sqlx::query_as::<_, ImportLogRow>(
            r#"
            INSERT INTO contact_import_logs (filename, imported_count, skipped_count, errors, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, filename, imported_count, skipped_count, errors, created_by, created_at
            "#,
        )
        .bind(filename)
        .bind(imported_count)
        .bind(skipped_count)
        .bind(&errors)
        .bind(&created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(log_row.into())
    }

    /// Get past import logs, newest first
    pub async fn list_import_logs(&self) -> AppResult<Vec<ContactImportLog>> {
        let rows = sqlx::query_as::<_, ImportLogRow>(
            r#"
            SELECT id, filename, imported_count, skipped_count, errors, created_by, created_at
            FROM contact_import_logs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ContactImportLog::from).collect())
    }

    /// Export the directory as CSV
    pub async fn export_directory_csv(&self) -> AppResult<String> {
        let contacts = self.list_directory_contacts(ContactFilter::default()).await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        for contact in &contacts {
            wtr.serialize(ExportRow {
                name: &contact.name,
                company: contact.company.as_deref(),
                title: contact.title.as_deref(),
                email: contact.email.as_deref(),
                phone: contact.phone.as_deref(),
                category: contact.category.as_str(),
                notes: contact.notes.as_deref(),
            })
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;

        Ok(csv_data)
    }
}

/// One CSV row in a contact import file
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: Option<String>,
    company: Option<String>,
    title: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    category: Option<String>,
    notes: Option<String>,
}

/// One CSV row in a directory export
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    company: Option<&'a str>,
    title: Option<&'a str>,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    category: &'a str,
    notes: Option<&'a str>,
}

/// Database row for import log data
#[derive(Debug, sqlx::FromRow)]
struct ImportLogRow {
    id: Uuid,
    filename: String,
    imported_count: i32,
    skipped_count: i32,
    errors: Vec<String>,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ImportLogRow> for ContactImportLog {
    fn from(row: ImportLogRow) -> Self {
        ContactImportLog {
            id: row.id,
            filename: row.filename,
            imported_count: row.imported_count,
            skipped_count: row.skipped_count,
            errors: row.errors,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

fn parse_category(category: Option<&str>) -> AppResult<ContactCategory> {
    match category {
        None => Ok(ContactCategory::Other),
        Some(s) => ContactCategory::from_str(s).ok_or_else(|| AppError::Validation {
            field: "category".to_string(),
            message: format!("Unknown contact category: {}", s),
        }),
    }
}

fn validate_contact_fields(
    name: &str,
    email: &Option<String>,
    phone: &Option<String>,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Contact name cannot be empty".to_string(),
        });
    }
    if let Some(email) = email {
        if let Err(msg) = validate_email(email) {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            });
        }
    }
    if let Some(phone) = phone {
        if let Err(msg) = validate_phone(phone) {
            return Err(AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_import_row(row: &ImportRow) -> Result<(), String> {
    match row.name.as_deref() {
        None => return Err("missing name".to_string()),
        Some(name) if name.trim().is_empty() => return Err("missing name".to_string()),
        Some(_) => {}
    }
    if let Some(ref email) = row.email {
        if !email.is_empty() && validate_email(email).is_err() {
            return Err(format!("invalid email: {}", email));
        }
    }
    if let Some(ref phone) = row.phone {
        if !phone.is_empty() && validate_phone(phone).is_err() {
            return Err(format!("invalid phone: {}", phone));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> ImportRow {
        ImportRow {
            name: name.map(String::from),
            company: None,
            title: None,
            email: email.map(String::from),
            phone: phone.map(String::from),
            category: None,
            notes: None,
        }
    }

    #[test]
    fn test_import_row_valid() {
        assert!(validate_import_row(&row(Some("Pat Lee"), Some("pat@dealer.com"), None)).is_ok());
        assert!(validate_import_row(&row(Some("Pat Lee"), None, Some("555-123-4567"))).is_ok());
    }

    #[test]
    fn test_import_row_missing_name() {
        assert_eq!(
            validate_import_row(&row(None, Some("pat@dealer.com"), None)),
            Err("missing name".to_string())
        );
        assert_eq!(
            validate_import_row(&row(Some("  "), None, None)),
            Err("missing name".to_string())
        );
    }

    #[test]
    fn test_import_row_bad_email() {
        let result = validate_import_row(&row(Some("Pat Lee"), Some("not-an-email"), None));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid email"));
    }

    #[test]
    fn test_import_row_empty_email_allowed() {
        assert!(validate_import_row(&row(Some("Pat Lee"), Some(""), None)).is_ok());
    }

    #[test]
    fn test_parse_category_defaults_to_other() {
        assert_eq!(parse_category(None).unwrap(), ContactCategory::Other);
        assert_eq!(
            parse_category(Some("vendor")).unwrap(),
            ContactCategory::Vendor
        );
        assert!(parse_category(Some("supplier")).is_err());
    }
}
