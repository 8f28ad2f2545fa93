//! Raw four pillars of a reference-zone instant.
//!
//! The year turns at 立春 and the month at each sectional term, both to the
//! exact instant. The day pillar follows the civil date, except that under
//! [`HourBoundaryMode::NextDayAt23`] the 23:00 hour already belongs to the
//! next day. The hour stem is always taken from the day that the zi hour
//! opens, so 23:00 uses the next day's stem in both modes.

use bazi_base::{Branch, GanZhi, SolarTerm};
use bazi_time::jd_from_reference;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

use crate::error::AlmanacError;
use crate::primitive::{HourBoundaryMode, LunarDate, RawPillar, RawPillars};
use crate::terms::{sectional_context, term_jd_ut};

/// Day pair of a civil date.
pub fn day_ganzhi(date: NaiveDate) -> GanZhi {
    GanZhi::for_jdn(bazi_time::jdn(date))
}

/// Year pair with the 立春 boundary applied.
pub fn year_ganzhi(instant: NaiveDateTime) -> Result<GanZhi, AlmanacError> {
    let civil = instant.year();
    let lichun = term_jd_ut(civil, SolarTerm::LiChun)?;
    let year = if jd_from_reference(&instant) >= lichun {
        civil
    } else {
        civil - 1
    };
    Ok(GanZhi::for_year(year))
}

/// Month pair governed by the latest sectional term.
pub fn month_ganzhi(instant: NaiveDateTime, year: GanZhi) -> Result<GanZhi, AlmanacError> {
    let ctx = sectional_context(instant)?;
    Ok(GanZhi::month_of(year.stem, ctx.prev.term.month_branch()))
}

/// Month pair of a lunisolar month, from its lunar year stem.
pub fn lunar_month_ganzhi(date: LunarDate) -> GanZhi {
    let year = GanZhi::for_year(date.year);
    // Month 1 is 寅.
    GanZhi::month_of(year.stem, Branch::from_index(i64::from(date.month) + 1))
}

/// Year, month, day and hour pillars of an instant.
pub fn raw_pillars(
    instant: NaiveDateTime,
    mode: HourBoundaryMode,
) -> Result<RawPillars, AlmanacError> {
    let year = year_ganzhi(instant)?;
    let month = month_ganzhi(instant, year)?;

    let date = instant.date();
    let late_zi = instant.hour() == 23;
    let next_date = date
        .checked_add_days(Days::new(1))
        .ok_or(AlmanacError::YearOutOfRange(date.year()))?;

    let day = match (mode, late_zi) {
        (HourBoundaryMode::NextDayAt23, true) => day_ganzhi(next_date),
        _ => day_ganzhi(date),
    };
    let hour_base = if late_zi {
        day_ganzhi(next_date)
    } else {
        day_ganzhi(date)
    };
    let hour = GanZhi::hour_of(hour_base.stem, Branch::for_hour(instant.hour()));

    tracing::trace!(%instant, %year, %month, %day, %hour, "raw pillars");
    Ok(RawPillars {
        year: RawPillar::from_ganzhi(year),
        month: RawPillar::from_ganzhi(month),
        day: RawPillar::from_ganzhi(day),
        hour: RawPillar::from_ganzhi(hour),
    })
}
