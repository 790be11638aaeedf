//! Calendar aggregation models
//!
//! Due-dated records from several tables collapse into [`CalendarItem`]s so
//! the month grid, the ICS feed, and the workbook exporter all see one shape.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dated entry on the calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: Uuid,
    pub kind: CalendarItemKind,
    pub title: String,
    pub date: NaiveDate,
    pub project_id: Uuid,
    pub project_number: String,
    /// Human-facing status ("Under Review"); empty when the source has none
    pub status_label: String,
    /// Hex fill color; neutral when the status has no mapping
    pub color: String,
}

/// Source record type of a calendar item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalendarItemKind {
    Milestone,
    Task,
    Rfi,
    Submittal,
}

impl CalendarItemKind {
    /// Fixed ordering rank within a day; milestones sort first
    pub fn rank(&self) -> u8 {
        match self {
            CalendarItemKind::Milestone => 0,
            CalendarItemKind::Task => 1,
            CalendarItemKind::Rfi => 2,
            CalendarItemKind::Submittal => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarItemKind::Milestone => "milestone",
            CalendarItemKind::Task => "task",
            CalendarItemKind::Rfi => "rfi",
            CalendarItemKind::Submittal => "submittal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "milestone" => Some(CalendarItemKind::Milestone),
            "task" => Some(CalendarItemKind::Task),
            "rfi" => Some(CalendarItemKind::Rfi),
            "submittal" => Some(CalendarItemKind::Submittal),
            _ => None,
        }
    }

    /// Label used in ICS CATEGORIES and sheet headers
    pub fn label(&self) -> &'static str {
        match self {
            CalendarItemKind::Milestone => "Milestone",
            CalendarItemKind::Task => "Task",
            CalendarItemKind::Rfi => "RFI",
            CalendarItemKind::Submittal => "Submittal",
        }
    }
}

/// Whether a record with the given due date counts as overdue
///
/// Due today is not overdue; records in a closed status never are.
pub fn is_overdue(due_date: NaiveDate, closed: bool, today: NaiveDate) -> bool {
    due_date < today && !closed
}

/// Group calendar items by day
///
/// Every item lands in exactly the bucket of its date. Within a day, items
/// order by kind rank then case-insensitive title.
pub fn group_by_day(items: Vec<CalendarItem>) -> BTreeMap<NaiveDate, Vec<CalendarItem>> {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarItem>> = BTreeMap::new();
    for item in items {
        days.entry(item.date).or_default().push(item);
    }
    for bucket in days.values_mut() {
        sort_day_items(bucket);
    }
    days
}

/// Order items within one day: kind rank, then title (case-insensitive)
pub fn sort_day_items(items: &mut [CalendarItem]) {
    items.sort_by(|a, b| {
        a.kind
            .rank()
            .cmp(&b.kind.rank())
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NEUTRAL_COLOR;

    fn item(kind: CalendarItemKind, title: &str, date: NaiveDate) -> CalendarItem {
        CalendarItem {
            id: Uuid::new_v4(),
            kind,
            title: title.to_string(),
            date,
            project_id: Uuid::new_v4(),
            project_number: "26-0001".to_string(),
            status_label: String::new(),
            color: NEUTRAL_COLOR.to_string(),
        }
    }

    #[test]
    fn test_group_by_day_partitions() {
        let d1 = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let items = vec![
            item(CalendarItemKind::Task, "a", d1),
            item(CalendarItemKind::Rfi, "b", d2),
            item(CalendarItemKind::Task, "c", d1),
        ];
        let days = group_by_day(items);
        assert_eq!(days.len(), 2);
        assert_eq!(days[&d1].len(), 2);
        assert_eq!(days[&d2].len(), 1);
    }

    #[test]
    fn test_day_ordering_by_kind_then_title() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let items = vec![
            item(CalendarItemKind::Submittal, "Windows", d),
            item(CalendarItemKind::Task, "zebra", d),
            item(CalendarItemKind::Milestone, "Set day", d),
            item(CalendarItemKind::Task, "Apple", d),
        ];
        let days = group_by_day(items);
        let ordered: Vec<&str> = days[&d].iter().map(|i| i.title.as_str()).collect();
        assert_eq!(ordered, vec!["Set day", "Apple", "zebra", "Windows"]);
    }

    #[test]
    fn test_overdue_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert!(is_overdue(yesterday, false, today));
        assert!(!is_overdue(today, false, today)); // due today is not overdue
        assert!(!is_overdue(yesterday, true, today)); // closed is never overdue
    }

    #[test]
    fn test_kind_rank_order() {
        assert!(CalendarItemKind::Milestone.rank() < CalendarItemKind::Task.rank());
        assert!(CalendarItemKind::Task.rank() < CalendarItemKind::Rfi.rank());
        assert!(CalendarItemKind::Rfi.rank() < CalendarItemKind::Submittal.rank());
    }
}
