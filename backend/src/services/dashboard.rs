//! Dashboard metrics service

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Dashboard service for the landing-page metric cards
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub open_tasks: i64,
    pub overdue_tasks: i64,
    pub open_rfis: i64,
    pub pending_submittals: i64,
    pub active_projects: i64,
    pub upcoming_milestones: i64,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get dashboard metrics as of the given day
    pub async fn get_metrics(&self, today: NaiveDate) -> AppResult<DashboardMetrics> {
        // Open and overdue task counts in one pass
        let task_counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status NOT IN ('complete', 'cancelled')) as open,
                COUNT(*) FILTER (WHERE status NOT IN ('complete', 'cancelled')
                    AND due_date IS NOT NULL AND due_date < $1) as overdue
            FROM tasks
            "#,
        )
        .bind(today)
        .fetch_one(&self.db)
        .await?;

        let open_rfis: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rfis WHERE status = 'open'")
                .fetch_one(&self.db)
                .await?;

        let pending_submittals: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM submittals WHERE status NOT IN ('approved', 'approved_as_noted', 'closed')",
        )
        .fetch_one(&self.db)
        .await?;

        let active_projects: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE status NOT IN ('delivered', 'closed')",
        )
        .fetch_one(&self.db)
        .await?;

        // Incomplete milestones due in the next two weeks
        let window_end = today + Duration::days(14);
        let upcoming_milestones: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM milestones
            WHERE completed = FALSE AND date >= $1 AND date <= $2
            "#,
        )
        .bind(today)
        .bind(window_end)
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardMetrics {
            open_tasks: task_counts.0,
            overdue_tasks: task_counts.1,
            open_rfis,
            pending_submittals,
            active_projects,
            upcoming_milestones,
        })
    }
}
