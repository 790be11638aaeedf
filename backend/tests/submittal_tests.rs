//! Submittal workflow tests
//!
//! Covers the resubmit transition, closed-status rules, and spec section
//! validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::HashSet;

use shared::models::{is_overdue, SubmittalStatus};
use shared::validation::validate_spec_section;

const ALL_STATUSES: [SubmittalStatus; 8] = [
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
// Helper Functions (mirroring the submittal service)
// ============================================================================

/// Outcome of a resubmit: new status, revision, sent date, returned date
type ResubmitOutcome = (SubmittalStatus, i32, Option<NaiveDate>, Option<NaiveDate>);

/// Mirror of the resubmit transition
fn apply_resubmit(
    status: SubmittalStatus,
    revision: i32,
    sent_date: NaiveDate,
) -> Result<ResubmitOutcome, String> {
    if !status.can_resubmit() {
        return Err(format!(
            "Cannot resubmit a submittal in status '{}'",
            status.as_str()
        ));
    }
    Ok((SubmittalStatus::Submitted, revision + 1, Some(sent_date), None))
}

/// Mirror of the plain status-edit guard: returned submittals must go
/// through resubmit instead of being edited back to submitted
fn status_edit_allowed(current: SubmittalStatus, target: SubmittalStatus) -> bool {
    !(current.can_resubmit() && target == SubmittalStatus::Submitted)
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn status_strategy() -> impl Strategy<Value = SubmittalStatus> {
    prop::sample::select(&ALL_STATUSES[..])
}

/// Valid CSI-style spec sections: 2-4 groups of 1-2 digits
fn valid_spec_section_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[0-9]{1,2}", 2..=4).prop_map(|groups| groups.join(" "))
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Resubmit is allowed exactly from the returned-for-correction states
    #[test]
    fn prop_resubmit_only_from_returned_states(
        status in status_strategy(),
        revision in 0i32..20,
    ) {
        let sent = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let result = apply_resubmit(status, revision, sent);
        prop_assert_eq!(result.is_ok(), status.can_resubmit());
    }

    /// A successful resubmit always increments the revision by one
    #[test]
    fn prop_resubmit_increments_revision(revision in 0i32..1000) {
        let sent = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let (status, new_revision, sent_date, returned_date) =
            apply_resubmit(SubmittalStatus::ReviseResubmit, revision, sent).unwrap();

        prop_assert_eq!(status, SubmittalStatus::Submitted);
        prop_assert_eq!(new_revision, revision + 1);
        prop_assert!(new_revision > revision);
        prop_assert_eq!(sent_date, Some(sent));
        prop_assert_eq!(returned_date, None);
    }

    /// Statuses survive the storage round trip
    #[test]
    fn prop_status_round_trip(status in status_strategy()) {
        prop_assert_eq!(SubmittalStatus::from_str(status.as_str()), Some(status));
    }

    /// Closed submittals never count as overdue
    #[test]
    fn prop_closed_never_overdue(status in status_strategy(), offset in 0i64..500) {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let due = today - chrono::Duration::days(offset);
        if status.is_closed() {
            prop_assert!(!is_overdue(due, status.is_closed(), today));
        }
    }

    /// Generated CSI-style sections always validate
    #[test]
    fn prop_valid_spec_sections_accepted(section in valid_spec_section_strategy()) {
        prop_assert!(validate_spec_section(&section).is_ok());
    }

    /// Sections with an oversized group never validate
    #[test]
    fn prop_wide_groups_rejected(group in "[0-9]{3,5}") {
        let section = format!("06 {}", group);
        prop_assert!(validate_spec_section(&section).is_err());
    }
}

// ============================================================================
// Unit Tests: Status Rules
// ============================================================================

mod status_rule_tests {
    use super::*;

    #[test]
    fn test_can_resubmit_exact_set() {
        for status in ALL_STATUSES {
            let expected = matches!(
                status,
                SubmittalStatus::ReviseResubmit | SubmittalStatus::Rejected
            );
            assert_eq!(status.can_resubmit(), expected, "status: {}", status);
        }
    }

    #[test]
    fn test_is_closed_exact_set() {
        for status in ALL_STATUSES {
            let expected = matches!(
                status,
                SubmittalStatus::Approved
                    | SubmittalStatus::ApprovedAsNoted
                    | SubmittalStatus::Closed
            );
            assert_eq!(status.is_closed(), expected, "status: {}", status);
        }
    }

    #[test]
    fn test_returned_submittal_cannot_be_edited_to_submitted() {
        assert!(!status_edit_allowed(
            SubmittalStatus::Rejected,
            SubmittalStatus::Submitted
        ));
        assert!(!status_edit_allowed(
            SubmittalStatus::ReviseResubmit,
            SubmittalStatus::Submitted
        ));
    }

    #[test]
    fn test_other_status_edits_allowed() {
        assert!(status_edit_allowed(
            SubmittalStatus::Draft,
            SubmittalStatus::Submitted
        ));
        assert!(status_edit_allowed(
            SubmittalStatus::Rejected,
            SubmittalStatus::Closed
        ));
        assert!(status_edit_allowed(
            SubmittalStatus::Submitted,
            SubmittalStatus::UnderReview
        ));
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SubmittalStatus::UnderReview.to_string(), "Under Review");
        assert_eq!(
            SubmittalStatus::ApprovedAsNoted.to_string(),
            "Approved as Noted"
        );
        assert_eq!(
            SubmittalStatus::ReviseResubmit.to_string(),
            "Revise & Resubmit"
        );
    }

    #[test]
    fn test_colors_distinct() {
        let colors: HashSet<&str> = ALL_STATUSES.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), ALL_STATUSES.len());
    }
}

// ============================================================================
// Unit Tests: Resubmit Transition
// ============================================================================

mod resubmit_tests {
    use super::*;

    #[test]
    fn test_resubmit_from_rejected() {
        let sent = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        let (status, revision, sent_date, returned_date) =
            apply_resubmit(SubmittalStatus::Rejected, 2, sent).unwrap();

        assert_eq!(status, SubmittalStatus::Submitted);
        assert_eq!(revision, 3);
        assert_eq!(sent_date, Some(sent));
        assert_eq!(returned_date, None);
    }

    #[test]
    fn test_resubmit_from_approved_rejected() {
        let sent = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        let err = apply_resubmit(SubmittalStatus::Approved, 1, sent).unwrap_err();
        assert!(err.contains("approved"));
    }

    #[test]
    fn test_resubmit_from_draft_rejected() {
        let sent = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        assert!(apply_resubmit(SubmittalStatus::Draft, 0, sent).is_err());
    }
}

// ============================================================================
// Unit Tests: Numbering and Spec Sections
// ============================================================================

mod numbering_tests {
    use super::*;

    #[test]
    fn test_number_format_pads_to_three() {
        assert_eq!(format!("SUB-{:03}", 4), "SUB-004");
        assert_eq!(format!("SUB-{:03}", 42), "SUB-042");
        assert_eq!(format!("SUB-{:03}", 1000), "SUB-1000");
    }

    #[test]
    fn test_spec_section_examples() {
        assert!(validate_spec_section("06 10 00").is_ok());
        assert!(validate_spec_section("09.91").is_ok());
        assert!(validate_spec_section("23 05 93 13").is_ok());

        assert!(validate_spec_section("06").is_err()); // single group
        assert!(validate_spec_section("061000").is_err()); // no separators
        assert!(validate_spec_section("06 AB").is_err()); // non-numeric
    }
}
