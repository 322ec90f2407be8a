//! Inclusive calendar-day date range used to filter log records

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{PageTallyError, Result};

/// Format accepted for user-supplied range bounds
pub const DAY_FORMAT: &str = "%d/%m/%Y";

/// Optional inclusive bounds, each normalized to a whole calendar day.
///
/// `start` is pinned to 00:00:00 and `end` to 23:59:59, so a bare end date
/// covers every record printed that day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(|d| d.and_time(NaiveTime::MIN)),
            end: end.and_then(|d| d.and_hms_opt(23, 59, 59)),
        }
    }

    /// Range that lets every record through, including undated ones
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a range from raw `dd/mm/yyyy` strings. Blank strings count as absent.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = parse_optional_day(start)?;
        let end = parse_optional_day(end)?;
        Ok(Self::new(start, end))
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// A start after the end matches nothing
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// Whether a record timestamp passes the filter.
    ///
    /// A missing timestamp never satisfies a bound, so it only passes an
    /// unbounded range.
    pub fn contains(&self, printed_at: Option<NaiveDateTime>) -> bool {
        let after_start = match self.start {
            None => true,
            Some(start) => printed_at.is_some_and(|t| t >= start),
        };
        let before_end = match self.end {
            None => true,
            Some(end) => printed_at.is_some_and(|t| t <= end),
        };
        after_start && before_end
    }
}

/// Parse a `dd/mm/yyyy` calendar date
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DAY_FORMAT)
        .map_err(|e| PageTallyError::InvalidDate(format!("'{}' ({})", trimmed, e)))
}

fn parse_optional_day(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_day(v).map(Some),
    }
}
