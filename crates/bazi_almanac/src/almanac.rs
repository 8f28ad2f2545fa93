//! Reference calendar primitive backed by the analytic sun and moon series.

use bazi_base::SolarTerm;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AlmanacError;
use crate::lunisolar;
use crate::pillars::{day_ganzhi, lunar_month_ganzhi, raw_pillars};
use crate::primitive::{
    CalendarPrimitive, Gender, HourBoundaryMode, LunarDate, RawDecadeCycle, RawPillar, RawPillars,
    TermContext,
};
use crate::terms::{check_year, sectional_context, term_boundary};
use crate::yun::decade_cycle;

/// Stateless calendar primitive evaluated from VSOP87 and Meeus lunations.
///
/// Valid for civil years [`MIN_YEAR`](crate::MIN_YEAR)..=[`MAX_YEAR`](crate::MAX_YEAR).
#[derive(Debug, Clone, Copy, Default)]
pub struct Almanac;

impl Almanac {
    pub fn new() -> Self {
        Self
    }
}

impl CalendarPrimitive for Almanac {
    fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate, AlmanacError> {
        lunisolar::lunar_to_solar(date)
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, AlmanacError> {
        lunisolar::solar_to_lunar(date)
    }

    fn raw_pillars(
        &self,
        instant: NaiveDateTime,
        mode: HourBoundaryMode,
    ) -> Result<RawPillars, AlmanacError> {
        raw_pillars(instant, mode)
    }

    fn lunar_month_pillar(&self, date: LunarDate) -> Result<RawPillar, AlmanacError> {
        check_year(date.year)?;
        if !(1..=12).contains(&date.month) {
            return Err(AlmanacError::InvalidLunarDate {
                year: date.year,
                month: date.month,
                leap: date.leap,
                day: date.day,
            });
        }
        Ok(RawPillar::from_ganzhi(lunar_month_ganzhi(date)))
    }

    fn term_context(&self, instant: NaiveDateTime) -> Result<TermContext, AlmanacError> {
        sectional_context(instant)
    }

    fn term_instant(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime, AlmanacError> {
        Ok(term_boundary(year, term)?.instant)
    }

    fn day_pillar(&self, date: NaiveDate) -> RawPillar {
        RawPillar::from_ganzhi(day_ganzhi(date))
    }

    fn decade_cycle(
        &self,
        instant: NaiveDateTime,
        gender: Gender,
        count: usize,
    ) -> Result<RawDecadeCycle, AlmanacError> {
        decade_cycle(instant, gender, count)
    }
}
