//! Naive civil timestamps: parsing, formatting and second-level shifts.
//!
//! Birth literals carry no zone; they are read as wall-clock time in the
//! zone of the reference meridian (UTC+8).

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::error::TimeError;

/// Accepted literal layout.
pub const CIVIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset of the reference meridian's zone from UTC, in hours.
pub const REFERENCE_ZONE_HOURS: i64 = 8;

/// Parse a `YYYY-MM-DD HH:MM:SS` literal.
pub fn parse_civil(literal: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(literal.trim(), CIVIL_FORMAT).map_err(|_| {
        TimeError::InvalidDateFormat {
            literal: literal.to_string(),
        }
    })
}

/// Fields of a literal read without checking the date against the Gregorian
/// calendar. Lunisolar birth dates use the same layout but their own month
/// lengths, so only the ranges common to both calendars are enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilFields {
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

/// Split a `YYYY-MM-DD HH:MM:SS` literal into fields.
pub fn parse_fields(literal: &str) -> Result<CivilFields, TimeError> {
    let invalid = || TimeError::InvalidDateFormat {
        literal: literal.to_string(),
    };
    let (date, time) = literal.trim().split_once(' ').ok_or_else(invalid)?;
    let triple = |s: &str, sep: char| -> Option<[u32; 3]> {
        let mut parts = s.split(sep).map(|p| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                p.parse::<u32>().ok()
            }
        });
        let out = [parts.next()??, parts.next()??, parts.next()??];
        parts.next().is_none().then_some(out)
    };
    let [year, month, day] = triple(date, '-').ok_or_else(invalid)?;
    let [hour, minute, second] = triple(time, ':').ok_or_else(invalid)?;
    let fields = CivilFields {
        year: i32::try_from(year).map_err(|_| invalid())?,
        month,
        day,
        hour,
        minute,
        second,
    };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || fields.time().is_none() {
        return Err(invalid());
    }
    Ok(fields)
}

/// Render a timestamp in the literal layout.
pub fn format_civil(t: &NaiveDateTime) -> String {
    t.format(CIVIL_FORMAT).to_string()
}

/// Shift by a fractional number of seconds.
///
/// The offset is rounded to whole microseconds before it is applied, then the
/// result is floored to the whole second.
pub fn shift_seconds(t: NaiveDateTime, seconds: f64) -> Result<NaiveDateTime, TimeError> {
    let micros = (seconds * 1e6).round_ties_even();
    if !micros.is_finite() || micros.abs() > 1e17 {
        return Err(TimeError::OutOfRange);
    }
    let shifted = t
        .checked_add_signed(Duration::microseconds(micros as i64))
        .ok_or(TimeError::OutOfRange)?;
    Ok(floor_to_second(shifted))
}

/// Drop any sub-second part.
pub fn floor_to_second(t: NaiveDateTime) -> NaiveDateTime {
    t.with_nanosecond(0).unwrap_or(t)
}
