//! Request-to-domain conversion for date filters.
//!
//! Search endpoints accept dates as raw `yyyy-MM-dd` strings. This module
//! turns them into UTC instants and enforces that a range is either fully
//! specified or fully absent, before any store access happens.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Error message for a date string that is not `yyyy-MM-dd`.
pub const MSG_DATE_FORMAT: &str = "date format must be yyyy-MM-dd";

/// Error message for a range with exactly one bound.
pub const MSG_RANGE_ASYMMETRIC: &str =
    "start and end date must both be present or both be absent";

/// An inclusive creation-time window. Both bounds are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateRange {
    /// Build a range from two optional bounds.
    ///
    /// Returns `Ok(None)` when both are absent and a validation error when
    /// only one is present. No ordering check is made: a range whose start
    /// is after its end is accepted and simply matches nothing.
    pub fn from_bounds(
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Option<Self>, CoreError> {
        check_range_symmetry(&start, &end)?;
        Ok(start.zip(end).map(|(start, end)| Self { start, end }))
    }

    /// Run the full string pipeline: blank normalization, strict date
    /// parsing of each bound, then the symmetry check.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, CoreError> {
        let start = parse_date_only(start)?;
        let end = parse_date_only(end)?;
        Self::from_bounds(start, end)
    }
}

/// Treat `None` and whitespace-only strings alike as absent.
pub fn normalize_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a strict `yyyy-MM-dd` date into the UTC instant at the start of
/// that day. Absent or blank input yields `Ok(None)`.
pub fn parse_date_only(value: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let Some(raw) = normalize_blank(value) else {
        return Ok(None);
    };

    if !has_iso_date_shape(raw) {
        return Err(CoreError::Validation(MSG_DATE_FORMAT.into()));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(MSG_DATE_FORMAT.into()))?;

    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}

/// Fail iff exactly one of `start` / `end` is present.
pub fn check_range_symmetry<T>(start: &Option<T>, end: &Option<T>) -> Result<(), CoreError> {
    if start.is_some() != end.is_some() {
        return Err(CoreError::Validation(MSG_RANGE_ASYMMETRIC.into()));
    }
    Ok(())
}

/// `chrono` accepts single-digit months/days and signed years for `%m`,
/// `%d` and `%Y`; require exactly four, two and two digits.
fn has_iso_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
}
