//! The calendar-primitive contract consumed by the chart engine.
//!
//! A primitive maps civil instants (wall clock in the UTC+8 reference zone)
//! to raw sexagenary pillars, solar-term boundaries, lunisolar dates and the
//! gendered decade cycle. The engine never computes ephemeris itself; it
//! only calls through [`CalendarPrimitive`].

use std::fmt::{Display, Formatter};

use bazi_base::{ALL_SOLAR_TERMS, Branch, Element, GanZhi, SolarTerm, Stem};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AlmanacError;

/// Gender, which sets the decade-cycle direction together with year polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Day boundary rule for the 23:00–23:59 late zi hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourBoundaryMode {
    /// The day pillar stays on the civil date; the hour stem follows the next day.
    #[default]
    LateZiSameDay,
    /// The day pillar advances at 23:00.
    #[serde(rename = "next_day_at_23")]
    NextDayAt23,
}

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    /// Lunar year, numbered by the civil year in which its first month begins.
    pub year: i32,
    /// Month number 1..=12.
    pub month: u8,
    /// True for the intercalary instance of `month`.
    pub leap: bool,
    /// Day of month 1..=30.
    pub day: u8,
}

impl LunarDate {
    pub fn new(year: i32, month: u8, leap: bool, day: u8) -> Self {
        Self {
            year,
            month,
            leap,
            day,
        }
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.leap { "闰" } else { "" };
        write!(f, "{}年{}{}月{}日", self.year, leap, self.month, self.day)
    }
}

/// One raw pillar as handed back by the primitive.
///
/// Stem and branch are kept apart so the engine can validate the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawPillar {
    pub stem: Stem,
    pub branch: Branch,
    /// Hidden stems ordered main, medium, residual.
    pub hidden_stems: Vec<Stem>,
    /// Element of the branch.
    pub element: Element,
}

impl RawPillar {
    pub fn from_ganzhi(gz: GanZhi) -> Self {
        Self {
            stem: gz.stem,
            branch: gz.branch,
            hidden_stems: gz.branch.hidden_stems().to_vec(),
            element: gz.branch.element(),
        }
    }
}

/// The four raw pillars of an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawPillars {
    pub year: RawPillar,
    pub month: RawPillar,
    pub day: RawPillar,
    pub hour: RawPillar,
}

/// A solar term and its instant (reference-zone wall clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermBoundary {
    pub term: SolarTerm,
    pub instant: NaiveDateTime,
}

/// Sectional terms bracketing an instant: `prev.instant <= t < next.instant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermContext {
    pub prev: TermBoundary,
    pub next: TermBoundary,
}

/// Onset offset in calendar units, counted from birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OnsetOffset {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
}

/// One decade period as enumerated by the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawDecadePeriod {
    /// 0 for the pre-onset stretch, 1.. for the decade periods.
    pub index: u32,
    pub start_year: i32,
    pub end_year: i32,
    /// Nominal (虚岁) age in the first year.
    pub start_age: i32,
    pub end_age: i32,
    /// Pillar of the period; absent for index 0.
    pub pillar: Option<GanZhi>,
}

/// The gendered decade cycle of a birth instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDecadeCycle {
    /// True when the periods run forward along the sexagenary cycle.
    pub forward: bool,
    pub offset: OnsetOffset,
    /// Instant at which the first decade period begins.
    pub onset: NaiveDateTime,
    pub periods: Vec<RawDecadePeriod>,
}

/// Calendar conversion capability the chart engine depends on.
pub trait CalendarPrimitive {
    /// Civil date on which a lunisolar date falls.
    fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate, AlmanacError>;

    /// Lunisolar date of a civil date.
    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, AlmanacError>;

    /// Year, month, day and hour pillars of an instant.
    fn raw_pillars(
        &self,
        instant: NaiveDateTime,
        mode: HourBoundaryMode,
    ) -> Result<RawPillars, AlmanacError>;

    /// Month pillar of a lunisolar month (leap months share their base month's pillar).
    fn lunar_month_pillar(&self, date: LunarDate) -> Result<RawPillar, AlmanacError>;

    /// Sectional terms immediately before and after an instant.
    fn term_context(&self, instant: NaiveDateTime) -> Result<TermContext, AlmanacError>;

    /// Instant of `term` in civil `year`.
    fn term_instant(&self, year: i32, term: SolarTerm) -> Result<NaiveDateTime, AlmanacError>;

    /// All 24 terms of civil `year`, in order.
    fn year_terms(&self, year: i32) -> Result<Vec<TermBoundary>, AlmanacError> {
        ALL_SOLAR_TERMS
            .iter()
            .map(|&term| {
                Ok(TermBoundary {
                    term,
                    instant: self.term_instant(year, term)?,
                })
            })
            .collect()
    }

    /// Day pillar of a civil date.
    fn day_pillar(&self, date: NaiveDate) -> RawPillar;

    /// Decade cycle for a birth instant, enumerating `count` periods from index 0.
    fn decade_cycle(
        &self,
        instant: NaiveDateTime,
        gender: Gender,
        count: usize,
    ) -> Result<RawDecadeCycle, AlmanacError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lunar_date_display() {
        assert_eq!(LunarDate::new(2023, 2, true, 11).to_string(), "2023年闰2月11日");
        assert_eq!(LunarDate::new(1989, 12, false, 5).to_string(), "1989年12月5日");
    }

    #[test]
    fn raw_pillar_carries_table_hidden_stems() {
        let p = RawPillar::from_ganzhi(GanZhi::from_index(2)); // 丙寅
        assert_eq!(p.hidden_stems, vec![Stem::Jia, Stem::Bing, Stem::Wu]);
        assert_eq!(p.element, Element::Wood);
    }
}
