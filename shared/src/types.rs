//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Fill color used when a status has no specific mapping
pub const NEUTRAL_COLOR: &str = "#9E9E9E";

/// Date range for queries (inclusive on both ends)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Calendar month as a date range
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = chrono::NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            chrono::NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next.pred_opt()?,
        })
    }
}
