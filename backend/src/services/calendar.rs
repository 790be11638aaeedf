//! Calendar aggregation service
//!
//! Collects due-dated rows from tasks, RFIs, submittals, milestones, and the
//! fixed project dates into one list of calendar items for the month grid
//! and the ICS feed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    group_by_day, CalendarItem, CalendarItemKind, ProjectStatus, RfiStatus, SubmittalStatus,
    TaskStatus,
};
use shared::types::{DateRange, NEUTRAL_COLOR};

/// Calendar service aggregating dated records across the schema
#[derive(Clone)]
pub struct CalendarService {
    db: PgPool,
}

/// Filter parameters for calendar queries
#[derive(Debug, Default, Deserialize)]
pub struct CalendarFilter {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
struct MilestoneItemRow {
    id: Uuid,
    name: String,
    date: NaiveDate,
    completed: bool,
    project_id: Uuid,
    project_number: String,
}

#[derive(Debug, sqlx::FromRow)]
struct TaskItemRow {
    id: Uuid,
    title: String,
    due_date: NaiveDate,
    status: String,
    project_id: Uuid,
    project_number: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RfiItemRow {
    id: Uuid,
    number: String,
    subject: String,
    due_date: NaiveDate,
    status: String,
    project_id: Uuid,
    project_number: String,
}

#[derive(Debug, sqlx::FromRow)]
struct SubmittalItemRow {
    id: Uuid,
    number: String,
    title: String,
    due_date: NaiveDate,
    status: String,
    project_id: Uuid,
    project_number: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectDatesRow {
    id: Uuid,
    number: String,
    name: String,
    status: String,
    production_start: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
}

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the day-keyed calendar for one month
    pub async fn month_view(
        &self,
        year: i32,
        month: u32,
        filter: CalendarFilter,
    ) -> AppResult<BTreeMap<NaiveDate, Vec<CalendarItem>>> {
        let range = DateRange::month(year, month).ok_or_else(|| AppError::Validation {
            field: "month".to_string(),
            message: format!("Invalid year/month: {}-{}", year, month),
        })?;

        let items = self.collect(&range, &filter).await?;
        Ok(group_by_day(items))
    }

    /// Collect all calendar items inside a date range
    ///
    /// Records without a due date never appear. Unknown status strings keep
    /// their raw label over the neutral color.
    pub async fn collect(
        &self,
        range: &DateRange,
        filter: &CalendarFilter,
    ) -> AppResult<Vec<CalendarItem>> {
        let mut items: Vec<CalendarItem> = Vec::new();

        let milestones = sqlx::query_as::<_, MilestoneItemRow>(
            r#"
            SELECT m.id, m.name, m.date, m.completed, m.project_id, p.number AS project_number
            FROM milestones m
            JOIN projects p ON p.id = m.project_id
            WHERE m.date >= $1 AND m.date <= $2
              AND ($3::uuid IS NULL OR m.project_id = $3)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(filter.project_id)
        .fetch_all(&self.db)
        .await?;

        for row in milestones {
            let (status_label, color) = if row.completed {
                ("Complete".to_string(), "#81C784".to_string())
            } else {
                ("Scheduled".to_string(), "#BA68C8".to_string())
            };
            items.push(CalendarItem {
                id: row.id,
                kind: CalendarItemKind::Milestone,
                title: row.name,
                date: row.date,
                project_id: row.project_id,
                project_number: row.project_number,
                status_label,
                color,
            });
        }

        let tasks = sqlx::query_as::<_, TaskItemRow>(
            r#"
            SELECT t.id, t.title, t.due_date, t.status, t.project_id, p.number AS project_number
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.due_date IS NOT NULL AND t.due_date >= $1 AND t.due_date <= $2
              AND ($3::uuid IS NULL OR t.project_id = $3)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(filter.project_id)
        .fetch_all(&self.db)
        .await?;

        for row in tasks {
            let (status_label, color) = match TaskStatus::from_str(&row.status) {
                Some(status) => (status.to_string(), status.color().to_string()),
                None => (row.status.clone(), NEUTRAL_COLOR.to_string()),
            };
            items.push(CalendarItem {
                id: row.id,
                kind: CalendarItemKind::Task,
                title: row.title,
                date: row.due_date,
                project_id: row.project_id,
                project_number: row.project_number,
                status_label,
                color,
            });
        }

        let rfis = sqlx::query_as::<_, RfiItemRow>(
            r#"
            SELECT r.id, r.number, r.subject, r.due_date, r.status, r.project_id,
                   p.number AS project_number
            FROM rfis r
            JOIN projects p ON p.id = r.project_id
            WHERE r.due_date IS NOT NULL AND r.due_date >= $1 AND r.due_date <= $2
              AND ($3::uuid IS NULL OR r.project_id = $3)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(filter.project_id)
        .fetch_all(&self.db)
        .await?;

        for row in rfis {
            let (status_label, color) = match RfiStatus::from_str(&row.status) {
                Some(status) => (status.to_string(), status.color().to_string()),
                None => (row.status.clone(), NEUTRAL_COLOR.to_string()),
            };
            items.push(CalendarItem {
                id: row.id,
                kind: CalendarItemKind::Rfi,
                title: format!("{}: {}", row.number, row.subject),
                date: row.due_date,
                project_id: row.project_id,
                project_number: row.project_number,
                status_label,
                color,
            });
        }

        let submittals = sqlx::query_as::<_, SubmittalItemRow>(
            r#"
            SELECT s.id, s.number, s.title, s.due_date, s.status, s.project_id,
                   p.number AS project_number
            FROM submittals s
            JOIN projects p ON p.id = s.project_id
            WHERE s.due_date IS NOT NULL AND s.due_date >= $1 AND s.due_date <= $2
              AND ($3::uuid IS NULL OR s.project_id = $3)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(filter.project_id)
        .fetch_all(&self.db)
        .await?;

        for row in submittals {
            let (status_label, color) = match SubmittalStatus::from_str(&row.status) {
                Some(status) => (status.to_string(), status.color().to_string()),
                None => (row.status.clone(), NEUTRAL_COLOR.to_string()),
            };
            items.push(CalendarItem {
                id: row.id,
                kind: CalendarItemKind::Submittal,
                title: format!("{}: {}", row.number, row.title),
                date: row.due_date,
                project_id: row.project_id,
                project_number: row.project_number,
                status_label,
                color,
            });
        }

        // Fixed project dates show as milestones
        let projects = sqlx::query_as::<_, ProjectDatesRow>(
            r#"
            SELECT id, number, name, status, production_start, delivery_date
            FROM projects
            WHERE ((production_start IS NOT NULL AND production_start >= $1 AND production_start <= $2)
                OR (delivery_date IS NOT NULL AND delivery_date >= $1 AND delivery_date <= $2))
              AND ($3::uuid IS NULL OR id = $3)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(filter.project_id)
        .fetch_all(&self.db)
        .await?;

        for row in projects {
            let (status_label, color) = match ProjectStatus::from_str(&row.status) {
                Some(status) => (status.to_string(), status.color().to_string()),
                None => (row.status.clone(), NEUTRAL_COLOR.to_string()),
            };

            if let Some(date) = row.production_start {
                if range.contains(date) {
                    items.push(CalendarItem {
                        id: row.id,
                        kind: CalendarItemKind::Milestone,
                        title: format!("Production Start: {}", row.name),
                        date,
                        project_id: row.id,
                        project_number: row.number.clone(),
                        status_label: status_label.clone(),
                        color: color.clone(),
                    });
                }
            }

            if let Some(date) = row.delivery_date {
                if range.contains(date) {
                    items.push(CalendarItem {
                        id: row.id,
                        kind: CalendarItemKind::Milestone,
                        title: format!("Delivery: {}", row.name),
                        date,
                        project_id: row.id,
                        project_number: row.number,
                        status_label,
                        color,
                    });
                }
            }
        }

        Ok(items)
    }
}
