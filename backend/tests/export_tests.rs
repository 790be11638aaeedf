//! Export formatting tests
//!
//! Comprehensive tests for:
//! - Property 8: Summary Bucket Totals
//! - Workbook column sizing
//! - Status color integrity across every enum

use proptest::prelude::*;
use serde::Serialize;

use shared::models::{ProjectStatus, RfiStatus, SubmittalStatus, TaskPriority, TaskStatus};
use shared::validation::validate_hex_color;

const TASK_STATUSES: [TaskStatus; 5] = [
    TaskStatus::Open,
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Complete,
    TaskStatus::Cancelled,
];

const TASK_PRIORITIES: [TaskPriority; 4] = [
    TaskPriority::Urgent,
    TaskPriority::High,
    TaskPriority::Medium,
    TaskPriority::Low,
];

const SUBMITTAL_STATUSES: [SubmittalStatus; 8] = [
    SubmittalStatus::Draft,
    SubmittalStatus::Submitted,
    SubmittalStatus::UnderReview,
    SubmittalStatus::Approved,
    SubmittalStatus::ApprovedAsNoted,
    SubmittalStatus::ReviseResubmit,
    SubmittalStatus::Rejected,
    SubmittalStatus::Closed,
];

// ============================================================================
// Helper Functions (mirroring the workbook exporter)
// ============================================================================

const MIN_WIDTH_CHARS: usize = 8;
const MAX_WIDTH_CHARS: usize = 40;
const WIDTH_PADDING: usize = 2;

/// Mirror of the column width rule
fn column_width(max_chars: usize) -> f64 {
    (max_chars.clamp(MIN_WIDTH_CHARS, MAX_WIDTH_CHARS) + WIDTH_PADDING) as f64
}

/// Mirror of the hex color parser; unknown input falls back to neutral grey
fn parse_hex_color(hex: &str) -> u32 {
    u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0x9E9E9E)
}

/// Mirror of the summary bucket counting
fn status_counts(statuses: &[TaskStatus]) -> Vec<(TaskStatus, usize)> {
    TASK_STATUSES
        .iter()
        .map(|status| {
            let count = statuses.iter().filter(|s| *s == status).count();
            (*status, count)
        })
        .collect()
}

fn priority_counts(priorities: &[TaskPriority]) -> Vec<(TaskPriority, usize)> {
    TASK_PRIORITIES
        .iter()
        .map(|priority| {
            let count = priorities.iter().filter(|p| *p == priority).count();
            (*priority, count)
        })
        .collect()
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(&TASK_STATUSES[..])
}

fn priority_strategy() -> impl Strategy<Value = TaskPriority> {
    prop::sample::select(&TASK_PRIORITIES[..])
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 8: Summary Bucket Totals
    /// Bucket counts always sum to the number of records
    #[test]
    fn prop_status_buckets_sum_to_total(
        statuses in prop::collection::vec(task_status_strategy(), 0..60),
    ) {
        let counts = status_counts(&statuses);
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        prop_assert_eq!(total, statuses.len());

        // Every bucket appears once, in the fixed declaration order
        prop_assert_eq!(counts.len(), TASK_STATUSES.len());
        for (bucket, declared) in counts.iter().zip(TASK_STATUSES.iter()) {
            prop_assert_eq!(bucket.0, *declared);
        }
    }

    /// Property 8: Priority buckets partition the same way
    #[test]
    fn prop_priority_buckets_sum_to_total(
        priorities in prop::collection::vec(priority_strategy(), 0..60),
    ) {
        let counts = priority_counts(&priorities);
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        prop_assert_eq!(total, priorities.len());
        prop_assert_eq!(counts[0].0, TaskPriority::Urgent);
    }

    /// Column widths stay within bounds and grow with content
    #[test]
    fn prop_column_width_bounded(chars in 0usize..200) {
        let width = column_width(chars);
        prop_assert!(width >= (MIN_WIDTH_CHARS + WIDTH_PADDING) as f64);
        prop_assert!(width <= (MAX_WIDTH_CHARS + WIDTH_PADDING) as f64);
    }

    #[test]
    fn prop_column_width_monotonic(a in 0usize..200, b in 0usize..200) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(column_width(small) <= column_width(large));
    }
}

// ============================================================================
// Unit Tests: Column Sizing
// ============================================================================

mod width_tests {
    use super::*;

    #[test]
    fn test_width_clamps() {
        assert_eq!(column_width(3), 10.0); // below minimum
        assert_eq!(column_width(20), 22.0); // within range
        assert_eq!(column_width(100), 42.0); // above maximum
    }

    #[test]
    fn test_width_at_bounds() {
        assert_eq!(column_width(MIN_WIDTH_CHARS), 10.0);
        assert_eq!(column_width(MAX_WIDTH_CHARS), 42.0);
    }
}

// ============================================================================
// Unit Tests: Status Colors
// ============================================================================

mod color_tests {
    use super::*;

    #[test]
    fn test_every_status_color_is_valid_hex() {
        for status in TASK_STATUSES {
            assert!(validate_hex_color(status.color()).is_ok(), "{}", status);
        }
        for status in SUBMITTAL_STATUSES {
            assert!(validate_hex_color(status.color()).is_ok(), "{}", status);
        }
        for status in [RfiStatus::Open, RfiStatus::Answered, RfiStatus::Closed] {
            assert!(validate_hex_color(status.color()).is_ok(), "{}", status);
        }
        for status in [
            ProjectStatus::Quoting,
            ProjectStatus::Contracted,
            ProjectStatus::InProduction,
            ProjectStatus::Delivered,
            ProjectStatus::Closed,
        ] {
            assert!(validate_hex_color(status.color()).is_ok(), "{}", status);
        }
    }

    #[test]
    fn test_hex_parse_matches_color_table() {
        assert_eq!(parse_hex_color(TaskStatus::Open.color()), 0x64B5F6);
        assert_eq!(parse_hex_color(TaskStatus::Complete.color()), 0x81C784);
        assert_eq!(parse_hex_color(SubmittalStatus::UnderReview.color()), 0xFFD54F);
    }

    #[test]
    fn test_hex_parse_falls_back_to_neutral() {
        assert_eq!(parse_hex_color("not-a-color"), 0x9E9E9E);
        assert_eq!(parse_hex_color(""), 0x9E9E9E);
    }
}

// ============================================================================
// Unit Tests: CSV Export Shape
// ============================================================================

mod csv_shape_tests {
    use super::*;

    /// Mirror of the task export row
    #[derive(Serialize)]
    struct TaskExportRow<'a> {
        project: &'a str,
        title: &'a str,
        status: &'a str,
        priority: &'a str,
        due_date: &'a str,
        department: Option<&'a str>,
        assignee: Option<&'a str>,
    }

    #[test]
    fn test_task_export_header_order() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(TaskExportRow {
            project: "26-0142",
            title: "Set modules",
            status: "Open",
            priority: "High",
            due_date: "2026-03-10",
            department: Some("Field Operations"),
            assignee: None,
        })
        .unwrap();

        let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let mut lines = data.lines();
        assert_eq!(
            lines.next().unwrap(),
            "project,title,status,priority,due_date,department,assignee"
        );
        assert_eq!(
            lines.next().unwrap(),
            "26-0142,Set modules,Open,High,2026-03-10,Field Operations,"
        );
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(TaskExportRow {
            project: "26-0142",
            title: "Order windows, doors",
            status: "Open",
            priority: "Medium",
            due_date: "",
            department: None,
            assignee: None,
        })
        .unwrap();

        let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert!(data.contains("\"Order windows, doors\""));
    }
}
