//! Julian Date helpers over chrono's naive types.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::civil::REFERENCE_ZONE_HOURS;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Offset between chrono's day count from CE and the Julian Day Number.
const CE_TO_JDN: i64 = 1_721_425;

/// Julian Day Number of a civil date (integer day starting at noon).
pub fn jdn(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + CE_TO_JDN
}

/// Civil date of a Julian Day Number.
pub fn date_from_jdn(jdn: i64) -> Option<NaiveDate> {
    i32::try_from(jdn - CE_TO_JDN)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Julian Date of a naive UTC timestamp.
pub fn jd_from_utc(t: &NaiveDateTime) -> f64 {
    let day_seconds = f64::from(t.num_seconds_from_midnight())
        + f64::from(t.nanosecond()) / 1e9;
    jdn(t.date()) as f64 - 0.5 + day_seconds / 86_400.0
}

/// Naive UTC timestamp of a Julian Date, rounded to the millisecond.
pub fn utc_from_jd(jd: f64) -> Option<NaiveDateTime> {
    let shifted = jd + 0.5;
    let day = shifted.floor();
    let millis = ((shifted - day) * 86_400_000.0).round() as i64;
    let midnight = date_from_jdn(day as i64)?.and_hms_opt(0, 0, 0)?;
    midnight.checked_add_signed(Duration::milliseconds(millis))
}

/// Julian Date of a wall-clock timestamp in the reference zone (UTC+8).
pub fn jd_from_reference(t: &NaiveDateTime) -> f64 {
    jd_from_utc(t) - REFERENCE_ZONE_HOURS as f64 / 24.0
}

/// Wall-clock timestamp in the reference zone of a Julian Date.
pub fn reference_from_jd(jd: f64) -> Option<NaiveDateTime> {
    utc_from_jd(jd + REFERENCE_ZONE_HOURS as f64 / 24.0)
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}
