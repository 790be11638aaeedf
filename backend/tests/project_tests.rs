//! Project and organization tests
//!
//! Covers project numbering, factory codes, and the project lifecycle.

use proptest::prelude::*;
use std::collections::HashSet;

use shared::models::ProjectStatus;
use shared::validation::{validate_factory_code, validate_project_number};

const ALL_STATUSES: [ProjectStatus; 5] = [
    ProjectStatus::Quoting,
    ProjectStatus::Contracted,
    ProjectStatus::InProduction,
    ProjectStatus::Delivered,
    ProjectStatus::Closed,
];

// ============================================================================
// Property Test Strategies
// ============================================================================

fn valid_project_number_strategy() -> impl Strategy<Value = String> {
    "[0-9]{2}-[0-9]{1,6}"
}

fn valid_factory_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{2,8}"
}

fn status_strategy() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(&ALL_STATUSES[..])
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Two-digit year, dash, numeric sequence always validates
    #[test]
    fn prop_valid_project_numbers_accepted(number in valid_project_number_strategy()) {
        prop_assert!(validate_project_number(&number).is_ok());
    }

    /// Four-digit years never validate
    #[test]
    fn prop_long_year_rejected(number in "[0-9]{4}-[0-9]{1,4}") {
        prop_assert!(validate_project_number(&number).is_err());
    }

    /// Alphabetic sequences never validate
    #[test]
    fn prop_alpha_sequence_rejected(number in "[0-9]{2}-[A-Za-z]{1,4}") {
        prop_assert!(validate_project_number(&number).is_err());
    }

    /// Uppercase alphanumeric codes of 2-8 characters always validate
    #[test]
    fn prop_valid_factory_codes_accepted(code in valid_factory_code_strategy()) {
        prop_assert!(validate_factory_code(&code).is_ok());
    }

    /// Oversized codes never validate
    #[test]
    fn prop_long_factory_codes_rejected(code in "[A-Z0-9]{9,15}") {
        prop_assert!(validate_factory_code(&code).is_err());
    }

    /// Statuses survive the storage round trip
    #[test]
    fn prop_status_round_trip(status in status_strategy()) {
        prop_assert_eq!(ProjectStatus::from_str(status.as_str()), Some(status));
    }
}

// ============================================================================
// Unit Tests: Project Numbers
// ============================================================================

mod project_number_tests {
    use super::*;

    #[test]
    fn test_typical_numbers() {
        assert!(validate_project_number("26-0142").is_ok());
        assert!(validate_project_number("24-1").is_ok());
        assert!(validate_project_number("25-123456").is_ok());
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(validate_project_number("260142").is_err()); // no dash
        assert!(validate_project_number("26-").is_err()); // empty sequence
        assert!(validate_project_number("26-0142-A").is_err()); // extra part
        assert!(validate_project_number("2026-0142").is_err()); // long year
        assert!(validate_project_number("26-1234567").is_err()); // long sequence
    }
}

// ============================================================================
// Unit Tests: Factory Codes
// ============================================================================

mod factory_code_tests {
    use super::*;

    #[test]
    fn test_typical_codes() {
        assert!(validate_factory_code("NE").is_ok());
        assert!(validate_factory_code("BLD1").is_ok());
        assert!(validate_factory_code("PLANT22").is_ok());
    }

    #[test]
    fn test_malformed_codes() {
        assert!(validate_factory_code("B").is_err()); // too short
        assert!(validate_factory_code("bld1").is_err()); // lowercase
        assert!(validate_factory_code("BL-1").is_err()); // punctuation
        assert!(validate_factory_code("BL 1").is_err()); // space
    }
}

// ============================================================================
// Unit Tests: Project Lifecycle
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(ProjectStatus::Quoting.is_active());
        assert!(ProjectStatus::Contracted.is_active());
        assert!(ProjectStatus::InProduction.is_active());
        assert!(!ProjectStatus::Delivered.is_active());
        assert!(!ProjectStatus::Closed.is_active());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ProjectStatus::Quoting.to_string(), "Quoting");
        assert_eq!(ProjectStatus::InProduction.to_string(), "In Production");
        assert_eq!(ProjectStatus::Delivered.to_string(), "Delivered");
    }

    #[test]
    fn test_storage_values() {
        assert_eq!(ProjectStatus::InProduction.as_str(), "in_production");
        assert_eq!(ProjectStatus::from_str("in_production"), Some(ProjectStatus::InProduction));
        assert_eq!(ProjectStatus::from_str("building"), None);
    }

    #[test]
    fn test_colors_distinct() {
        let colors: HashSet<&str> = ALL_STATUSES.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), ALL_STATUSES.len());
    }

    #[test]
    fn test_closed_uses_neutral_color() {
        assert_eq!(ProjectStatus::Closed.color(), "#9E9E9E");
    }
}
