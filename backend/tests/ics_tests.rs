//! ICS feed format tests
//!
//! Comprehensive tests for:
//! - Property 1: Exclusive Event End Dates
//! - Property 2: Text Escaping Round Trip
//! - Property 3: Line Folding Under 75 Octets

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

/// Maximum octets per physical content line, line break excluded
const LINE_LIMIT: usize = 75;

// ============================================================================
// Helper Functions (mirroring the ICS serializer)
// ============================================================================

/// Escape a TEXT value per RFC 5545 section 3.3.11
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of escape_text; unknown escapes pass through unchanged
fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(';') => out.push(';'),
            Some(',') => out.push(','),
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Fold a content line at 75 octets with CRLF + single space
fn fold_line(line: &str) -> String {
    if line.len() <= LINE_LIMIT {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut used = 0;
    let mut budget = LINE_LIMIT;
    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            budget = LINE_LIMIT - 1;
            used = 0;
        }
        out.push(ch);
        used += width;
    }
    out
}

/// Strip every CRLF-plus-whitespace continuation
fn unfold(content: &str) -> String {
    content.replace("\r\n ", "").replace("\r\n\t", "")
}

/// ICS DATE value (yyyymmdd)
fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Exclusive end date of an all-day event
fn end_date(start: NaiveDate) -> NaiveDate {
    start.succ_opt().unwrap_or(start)
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Dates from 2020-01-01 onward, covering every month end and leap day
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..4000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

/// Arbitrary text weighted toward the characters escaping must handle
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            5 => any::<char>(),
            1 => Just('\\'),
            1 => Just(';'),
            1 => Just(','),
            1 => Just('\n'),
        ],
        0..120,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Content lines mixing single-byte and multi-byte characters
fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => proptest::char::range('a', 'z'),
            1 => Just(' '),
            1 => Just('é'),
            1 => Just('日'),
            1 => Just('語'),
        ],
        0..300,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Exclusive Event End Dates
    /// An all-day event ends exactly one day after it starts
    #[test]
    fn prop_event_end_is_next_day(start in date_strategy()) {
        let end = end_date(start);
        prop_assert_eq!(end.signed_duration_since(start).num_days(), 1);
        prop_assert_ne!(format_date(start), format_date(end));
    }

    /// Property 1: DATE values are always eight digits
    #[test]
    fn prop_date_format_shape(date in date_strategy()) {
        let formatted = format_date(date);
        prop_assert_eq!(formatted.len(), 8);
        prop_assert!(formatted.chars().all(|c| c.is_ascii_digit()));
    }

    /// Property 2: Text Escaping Round Trip
    #[test]
    fn prop_escape_round_trip(text in text_strategy()) {
        prop_assert_eq!(unescape_text(&escape_text(&text)), text);
    }

    /// Property 2: Escaped output carries no bare special characters
    #[test]
    fn prop_escaped_text_has_no_bare_specials(text in text_strategy()) {
        let escaped = escape_text(&text);
        prop_assert!(!escaped.contains('\n'));

        // After removing every escape sequence, none of the specials remain
        let stripped = escaped
            .replace("\\\\", "")
            .replace("\\;", "")
            .replace("\\,", "")
            .replace("\\n", "");
        prop_assert!(!stripped.contains('\\'));
        prop_assert!(!stripped.contains(';'));
        prop_assert!(!stripped.contains(','));
    }

    /// Property 3: Line Folding Under 75 Octets
    /// Every physical line fits the limit and unfolding restores the input
    #[test]
    fn prop_folded_lines_within_limit(line in line_strategy()) {
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            prop_assert!(
                physical.len() <= LINE_LIMIT,
                "physical line is {} octets",
                physical.len()
            );
        }
        prop_assert_eq!(unfold(&folded), line);
    }

    /// Property 3: Continuation lines always begin with a space
    #[test]
    fn prop_continuation_lines_start_with_space(line in line_strategy()) {
        let folded = fold_line(&line);
        for continuation in folded.split("\r\n").skip(1) {
            prop_assert!(continuation.starts_with(' '));
        }
    }
}

// ============================================================================
// Unit Tests: Date Boundaries
// ============================================================================

mod date_boundary_tests {
    use super::*;

    #[test]
    fn test_end_date_crosses_month() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(format_date(end_date(jan31)), "20260201");

        let apr30 = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        assert_eq!(format_date(end_date(apr30)), "20260501");
    }

    #[test]
    fn test_end_date_crosses_year() {
        let dec31 = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_date(end_date(dec31)), "20260101");
    }

    #[test]
    fn test_end_date_february() {
        // Leap year: Feb 28 is not the last day
        let feb28_leap = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(format_date(end_date(feb28_leap)), "20240229");

        let feb29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_date(end_date(feb29)), "20240301");

        // Common year
        let feb28 = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(format_date(end_date(feb28)), "20260301");
    }

    #[test]
    fn test_format_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_date(date), "20260305");
    }
}

// ============================================================================
// Unit Tests: Escaping
// ============================================================================

mod escaping_tests {
    use super::*;

    #[test]
    fn test_escape_each_special() {
        assert_eq!(escape_text("a;b"), "a\\;b");
        assert_eq!(escape_text("a,b"), "a\\,b");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("a\nb"), "a\\nb");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_text("Install trusses"), "Install trusses");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_unescape_unknown_sequence_passes_through() {
        assert_eq!(unescape_text("a\\tb"), "a\\tb");
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape_text("abc\\"), "abc\\");
    }
}

// ============================================================================
// Unit Tests: Folding
// ============================================================================

mod folding_tests {
    use super::*;

    #[test]
    fn test_short_line_unchanged() {
        let line = "SUMMARY:Set modules";
        assert_eq!(fold_line(line), line);
    }

    #[test]
    fn test_line_at_limit_unchanged() {
        let line = "x".repeat(75);
        assert_eq!(fold_line(&line), line);
    }

    #[test]
    fn test_long_ascii_line_folds() {
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        let folded = fold_line(&line);

        let physical: Vec<&str> = folded.split("\r\n").collect();
        assert!(physical.len() > 1);
        assert_eq!(physical[0].len(), 75);
        for cont in &physical[1..] {
            assert!(cont.starts_with(' '));
            assert!(cont.len() <= 75);
        }
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn test_fold_never_splits_multibyte() {
        let line = format!("SUMMARY:{}", "日本語テキスト".repeat(20));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75);
            // A split inside a UTF-8 sequence would have broken the String
            assert!(physical.chars().count() > 0);
        }
        assert_eq!(unfold(&folded), line);
    }
}
