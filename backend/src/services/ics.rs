//! iCalendar (RFC 5545) serialization
//!
//! Emits the calendar feed as all-day VEVENTs. Three format rules carry the
//! correctness weight here:
//! - DTEND is exclusive, so an all-day event ends the day after it starts;
//!   emitting DTEND = DTSTART renders a zero-duration event in most clients.
//! - TEXT values escape backslash, semicolon, comma, and newline.
//! - Content lines fold at 75 octets with CRLF + single space, and the fold
//!   point never splits a UTF-8 sequence.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{AppError, AppResult};
use shared::models::{group_by_day, CalendarItem};

/// Maximum octets per physical content line, line break excluded
const LINE_LIMIT: usize = 75;

const PRODID: &str = "-//ModTrack//Modular Build Tracking Platform//EN";

/// Escape a TEXT value per RFC 5545 section 3.3.11
pub fn escape_text(text: &str) -> String {
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

/// Reverse [`escape_text`]; unknown escape sequences pass through unchanged
pub fn unescape_text(text: &str) -> String {
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

/// Fold a content line at 75 octets
///
/// Continuation lines begin with one space that counts toward their limit.
/// The fold point always lands on a character boundary.
pub fn fold_line(line: &str) -> String {
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
            // Continuation lines spend one octet on the leading space
            budget = LINE_LIMIT - 1;
            used = 0;
        }
        out.push(ch);
        used += width;
    }
    out
}

/// Reverse line folding: strip every CRLF-plus-whitespace continuation
pub fn unfold(content: &str) -> String {
    content.replace("\r\n ", "").replace("\r\n\t", "")
}

/// Format a date as an ICS DATE value (yyyymmdd)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Exclusive end date of an all-day event: the day after it starts
pub fn end_date(start: NaiveDate) -> NaiveDate {
    start.succ_opt().unwrap_or(start)
}

/// Build a VCALENDAR document from calendar items
///
/// Items sort by date, then kind rank, then title, so output is stable for a
/// given input set. Returns `ExportEmpty` when there is nothing to emit.
pub fn build_calendar(
    items: &[CalendarItem],
    generated_at: DateTime<Utc>,
) -> AppResult<String> {
    if items.is_empty() {
        return Err(AppError::ExportEmpty(
            "No dated items to export".to_string(),
        ));
    }

    // Day buckets come back date-ordered with the in-day kind/title ordering
    let days = group_by_day(items.to_vec());

    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "X-WR-CALNAME:ModTrack Schedule".to_string(),
    ];

    for item in days.values().flatten() {
        let start = format_date(item.date);
        let end = format_date(end_date(item.date));
        let description = format!(
            "Project {}. Status: {}",
            item.project_number, item.status_label
        );

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:{}-{}-{}@modtrack",
            item.kind.as_str(),
            item.id,
            start
        ));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("DTSTART;VALUE=DATE:{}", start));
        lines.push(format!("DTEND;VALUE=DATE:{}", end));
        lines.push(format!("SUMMARY:{}", escape_text(&item.title)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
        lines.push(format!("CATEGORIES:{}", item.kind.label()));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in lines {
        out.push_str(&fold_line(&line));
        out.push_str("\r\n");
    }
    Ok(out)
}
