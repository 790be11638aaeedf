//! Task management service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    suggest_department, ContactKind, ContactRef, Task, TaskPriority, TaskStatus,
};

/// Task service for tracked work items
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

/// Database row for a task
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    project_id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    department: Option<String>,
    assignee_kind: Option<String>,
    assignee_id: Option<Uuid>,
    assignee_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        let assignee = match (row.assignee_kind, row.assignee_id, row.assignee_name) {
            (Some(kind), Some(id), Some(name)) => {
                ContactKind::from_str(&kind).map(|kind| ContactRef { kind, id, name })
            }
            _ => None,
        };

        Task {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status: TaskStatus::from_str(&row.status).unwrap_or(TaskStatus::Open),
            priority: TaskPriority::from_str(&row.priority).unwrap_or(TaskPriority::Medium),
            due_date: row.due_date,
            department: row.department,
            assignee,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a task
#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub assignee: Option<ContactRef>,
}

/// Input for updating a task
#[derive(Debug, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub assignee: Option<ContactRef>,
}

/// Filters for listing tasks
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

impl TaskService {
    /// Create a new TaskService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List tasks with optional filters, ordered by priority rank then due date
    pub async fn list_tasks(&self, filter: TaskFilter) -> AppResult<Vec<Task>> {
        if let Some(ref status) = filter.status {
            if TaskStatus::from_str(status).is_none() {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: "Invalid task status".to_string(),
                });
            }
        }

        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, project_id, title, description, status, priority, due_date, department,
                   assignee_kind, assignee_id, assignee_name, created_at, updated_at
            FROM tasks
            WHERE ($1::uuid IS NULL OR project_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR department = $3)
              AND ($4::date IS NULL OR due_date >= $4)
              AND ($5::date IS NULL OR due_date <= $5)
            ORDER BY
                CASE priority
                    WHEN 'urgent' THEN 0
                    WHEN 'high' THEN 1
                    WHEN 'medium' THEN 2
                    ELSE 3
                END,
                due_date ASC NULLS LAST,
                LOWER(title)
            "#,
        )
        .bind(filter.project_id)
        .bind(&filter.status)
        .bind(&filter.department)
        .bind(filter.due_from)
        .bind(filter.due_to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    /// List tasks due strictly before `today` and not complete or cancelled
    pub async fn list_overdue_tasks(&self, today: NaiveDate) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, project_id, title, description, status, priority, due_date, department,
                   assignee_kind, assignee_id, assignee_name, created_at, updated_at
            FROM tasks
            WHERE due_date < $1
              AND status NOT IN ('complete', 'cancelled')
            ORDER BY due_date, LOWER(title)
            "#,
        )
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    /// Get a task by ID
    pub async fn get_task(&self, task_id: Uuid) -> AppResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, project_id, title, description, status, priority, due_date, department,
                   assignee_kind, assignee_id, assignee_name, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        Ok(row.into())
    }

    /// Create a new task
    ///
    /// When no department is given, the title is matched against the keyword
    /// routing table and the suggestion (if any) is stored.
    pub async fn create_task(&self, input: CreateTaskInput) -> AppResult<Task> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                message: "Task title cannot be empty".to_string(),
            });
        }

        let priority = match input.priority {
            Some(ref p) => TaskPriority::from_str(p).ok_or_else(|| AppError::Validation {
                field: "priority".to_string(),
                message: "Invalid task priority".to_string(),
            })?,
            None => TaskPriority::Medium,
        };

        // Parent project must exist
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE id = $1")
            .bind(input.project_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let department = input
            .department
            .or_else(|| suggest_department(&input.title).map(str::to_string));

        let (assignee_kind, assignee_id, assignee_name) = split_assignee(&input.assignee);

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, priority, due_date,
                               department, assignee_kind, assignee_id, assignee_name)
            VALUES ($1, $2, $3, 'open', $4, $5, $6, $7, $8, $9)
            RETURNING id, project_id, title, description, status, priority, due_date, department,
                      assignee_kind, assignee_id, assignee_name, created_at, updated_at
            "#,
        )
        .bind(input.project_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(priority.as_str())
        .bind(input.due_date)
        .bind(&department)
        .bind(assignee_kind)
        .bind(assignee_id)
        .bind(assignee_name)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a task
    pub async fn update_task(&self, task_id: Uuid, input: UpdateTaskInput) -> AppResult<Task> {
        let existing = self.get_task(task_id).await?;

        let status = match input.status {
            Some(ref s) => TaskStatus::from_str(s).ok_or_else(|| AppError::Validation {
                field: "status".to_string(),
                message: "Invalid task status".to_string(),
            })?,
            None => existing.status,
        };

        let priority = match input.priority {
            Some(ref p) => TaskPriority::from_str(p).ok_or_else(|| AppError::Validation {
                field: "priority".to_string(),
                message: "Invalid task priority".to_string(),
            })?,
            None => existing.priority,
        };

        let title = input.title.unwrap_or(existing.title);
        if title.trim().is_empty() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                message: "Task title cannot be empty".to_string(),
            });
        }

        let description = input.description.or(existing.description);
        let due_date = input.due_date.or(existing.due_date);
        let department = input.department.or(existing.department);
        let assignee = input.assignee.or(existing.assignee);
        let (assignee_kind, assignee_id, assignee_name) = split_assignee(&assignee);

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, priority = $4, due_date = $5,
                department = $6, assignee_kind = $7, assignee_id = $8, assignee_name = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING id, project_id, title, description, status, priority, due_date, department,
                      assignee_kind, assignee_id, assignee_name, created_at, updated_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(status.as_str())
        .bind(priority.as_str())
        .bind(due_date)
        .bind(&department)
        .bind(assignee_kind)
        .bind(assignee_id)
        .bind(assignee_name)
        .bind(task_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a task and its attachments
    pub async fn delete_task(&self, task_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM file_attachments WHERE parent_kind = 'task' AND parent_id = $1")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Export tasks matching the filter as a flat CSV
    pub async fn export_csv(&self, filter: TaskFilter) -> AppResult<String> {
        if let Some(ref status) = filter.status {
            if TaskStatus::from_str(status).is_none() {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: "Invalid task status".to_string(),
                });
            }
        }

        let rows = sqlx::query_as::<_, TaskExportQueryRow>(
            r#"
            SELECT p.number AS project_number, t.title, t.status, t.priority,
                   t.due_date, t.department, t.assignee_name
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE ($1::uuid IS NULL OR t.project_id = $1)
              AND ($2::text IS NULL OR t.status = $2)
              AND ($3::text IS NULL OR t.department = $3)
              AND ($4::date IS NULL OR t.due_date >= $4)
              AND ($5::date IS NULL OR t.due_date <= $5)
            ORDER BY p.number,
                CASE t.priority
                    WHEN 'urgent' THEN 0
                    WHEN 'high' THEN 1
                    WHEN 'medium' THEN 2
                    ELSE 3
                END,
                t.due_date ASC NULLS LAST,
                LOWER(t.title)
            "#,
        )
        .bind(filter.project_id)
        .bind(&filter.status)
        .bind(&filter.department)
        .bind(filter.due_from)
        .bind(filter.due_to)
        .fetch_all(&self.db)
        .await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        for row in &rows {
            let status_label = TaskStatus::from_str(&row.status)
                .map(|s| s.to_string())
                .unwrap_or_else(|| row.status.clone());
            let priority_label = TaskPriority::from_str(&row.priority)
                .map(|p| p.to_string())
                .unwrap_or_else(|| row.priority.clone());
            wtr.serialize(TaskExportRow {
                project: &row.project_number,
                title: &row.title,
                status: &status_label,
                priority: &priority_label,
                due_date: row.due_date.map(|d| d.to_string()).unwrap_or_default(),
                department: row.department.as_deref(),
                assignee: row.assignee_name.as_deref(),
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

/// Database row for the task export query
#[derive(Debug, sqlx::FromRow)]
struct TaskExportQueryRow {
    project_number: String,
    title: String,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    department: Option<String>,
    assignee_name: Option<String>,
}

/// One CSV row in a task export
#[derive(Debug, serde::Serialize)]
struct TaskExportRow<'a> {
    project: &'a str,
    title: &'a str,
    status: &'a str,
    priority: &'a str,
    due_date: String,
    department: Option<&'a str>,
    assignee: Option<&'a str>,
}

/// Split an optional assignee into bindable columns
fn split_assignee(
    assignee: &Option<ContactRef>,
) -> (Option<&'static str>, Option<Uuid>, Option<String>) {
    match assignee {
        Some(a) => (Some(a.kind.as_str()), Some(a.id), Some(a.name.clone())),
        None => (None, None, None),
    }
}
