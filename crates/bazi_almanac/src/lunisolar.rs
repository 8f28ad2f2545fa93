//! Chinese lunisolar calendar reckoned from true new moons and solar terms.
//!
//! Months begin on the civil day (UTC+8) of a new moon. The month holding the
//! winter solstice is month 11. When 13 new moons fall between two such
//! months, the first month after month 11 that contains no principal term
//! (中气) is intercalary and repeats the previous month's number.

use bazi_base::SolarTerm;
use bazi_time::{REFERENCE_ZONE_HOURS, date_from_jdn, jdn};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::AlmanacError;
use crate::moon::{nearest_lunation, new_moon_ut};
use crate::primitive::LunarDate;
use crate::sun::apparent_longitude_at_ut;
use crate::terms::{check_year, term_jd_ut};

const ZONE_DAYS: f64 = REFERENCE_ZONE_HOURS as f64 / 24.0;

/// One lunisolar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarMonth {
    pub year: i32,
    pub month: u8,
    pub leap: bool,
    /// Julian Day Number of the first day.
    pub start_jdn: i64,
    /// 29 or 30.
    pub days: u8,
}

impl LunarMonth {
    pub fn contains(&self, day_jdn: i64) -> bool {
        (self.start_jdn..self.start_jdn + i64::from(self.days)).contains(&day_jdn)
    }
}

/// Reference-zone civil day of a UT Julian Date.
fn zone_jdn(jd_ut: f64) -> i64 {
    (jd_ut + ZONE_DAYS + 0.5).floor() as i64
}

/// UT Julian Date of 00:00 reference-zone time on a civil day.
fn zone_midnight_ut(day_jdn: i64) -> f64 {
    day_jdn as f64 - 0.5 - ZONE_DAYS
}

/// Lunation whose new-moon day is the latest on or before `day_jdn`.
fn lunation_on_or_before(day_jdn: i64) -> i64 {
    let mut k = nearest_lunation(day_jdn as f64) + 1;
    while zone_jdn(new_moon_ut(k)) > day_jdn {
        k -= 1;
    }
    while zone_jdn(new_moon_ut(k + 1)) <= day_jdn {
        k += 1;
    }
    k
}

/// True when no principal term starts between the two civil days.
fn lacks_principal_term(start_jdn: i64, next_start_jdn: i64) -> bool {
    let sector = |d: i64| (apparent_longitude_at_ut(zone_midnight_ut(d)) / 30.0).floor() as i64;
    sector(start_jdn) == sector(next_start_jdn)
}

/// Months from the month-11 containing the winter solstice of civil year `s`
/// up to (excluding) the next month 11.
pub fn solstice_cycle(s: i32) -> Result<Vec<LunarMonth>, AlmanacError> {
    check_year(s)?;
    check_year(s + 1)?;
    let k0 = lunation_on_or_before(zone_jdn(term_jd_ut(s, SolarTerm::DongZhi)?));
    let k1 = lunation_on_or_before(zone_jdn(term_jd_ut(s + 1, SolarTerm::DongZhi)?));
    let starts: Vec<i64> = (k0..=k1).map(|k| zone_jdn(new_moon_ut(k))).collect();
    let count = starts.len() - 1;

    let leap_index = if count == 13 {
        (1..count).find(|&i| lacks_principal_term(starts[i], starts[i + 1]))
    } else {
        None
    };

    let mut months = Vec::with_capacity(count);
    let mut number: u8 = 11;
    let mut year = s;
    for i in 0..count {
        let leap = Some(i) == leap_index;
        if i > 0 && !leap {
            number = number % 12 + 1;
            if number == 1 {
                year = s + 1;
            }
        }
        months.push(LunarMonth {
            year,
            month: number,
            leap,
            start_jdn: starts[i],
            days: (starts[i + 1] - starts[i]) as u8,
        });
    }
    Ok(months)
}

/// The months of lunar `year` in order, leap month included.
pub fn lunar_year_months(year: i32) -> Result<Vec<LunarMonth>, AlmanacError> {
    let mut months: Vec<LunarMonth> = solstice_cycle(year - 1)?
        .into_iter()
        .filter(|m| m.year == year)
        .collect();
    months.extend(solstice_cycle(year)?.into_iter().filter(|m| m.year == year));
    Ok(months)
}

/// Leap month number of lunar `year`, if any.
pub fn leap_month(year: i32) -> Result<Option<u8>, AlmanacError> {
    Ok(lunar_year_months(year)?
        .iter()
        .find(|m| m.leap)
        .map(|m| m.month))
}

/// Lunisolar date of a civil date.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, AlmanacError> {
    let day = jdn(date);
    for s in [date.year(), date.year() - 1] {
        if let Some(m) = solstice_cycle(s)?.into_iter().find(|m| m.contains(day)) {
            return Ok(LunarDate::new(
                m.year,
                m.month,
                m.leap,
                (day - m.start_jdn + 1) as u8,
            ));
        }
    }
    Err(AlmanacError::NoConvergence("lunar month lookup"))
}

/// Civil date of a lunisolar date.
pub fn lunar_to_solar(date: LunarDate) -> Result<NaiveDate, AlmanacError> {
    let invalid = AlmanacError::InvalidLunarDate {
        year: date.year,
        month: date.month,
        leap: date.leap,
        day: date.day,
    };
    if !(1..=12).contains(&date.month) || date.day == 0 {
        return Err(invalid);
    }
    let month = lunar_year_months(date.year)?
        .into_iter()
        .find(|m| m.month == date.month && m.leap == date.leap)
        .ok_or_else(|| invalid.clone())?;
    if date.day > month.days {
        return Err(invalid);
    }
    date_from_jdn(month.start_jdn + i64::from(date.day) - 1)
        .ok_or(AlmanacError::YearOutOfRange(date.year))
}
