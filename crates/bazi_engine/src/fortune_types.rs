//! Types for the fortune timeline.

use bazi_almanac::OnsetOffset;
use bazi_base::{GanZhi, SolarTerm};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One civil day of an expanded month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FortuneDay {
    pub date: NaiveDate,
    pub pillar: GanZhi,
}

/// One solar-term month (流月) of an expanded year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneMonth {
    /// 1 for the 寅 month opened by 立春, 12 for the 丑 month.
    pub index: u8,
    /// Sectional term that opens the month.
    pub term: SolarTerm,
    /// Instant of that term.
    pub starts: NaiveDateTime,
    pub pillar: GanZhi,
    pub days: Vec<FortuneDay>,
}

/// One year (流年) of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneYear {
    pub year: i32,
    /// Nominal (虚岁) age.
    pub age: i32,
    pub pillar: GanZhi,
    pub xun: GanZhi,
    /// Minor fortune (小运) for this age.
    pub minor: GanZhi,
    /// Filled in only by expansion.
    pub months: Option<Vec<FortuneMonth>>,
}

impl FortuneYear {
    pub fn is_expanded(&self) -> bool {
        self.months.is_some()
    }
}

/// One decade period (大运); index 0 covers the years before onset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortunePeriod {
    pub index: u32,
    pub start_year: i32,
    pub end_year: i32,
    /// Nominal (虚岁) age in `start_year`: start year minus birth year plus 1.
    pub start_age: i32,
    /// Nominal age in `end_year`.
    pub end_age: i32,
    /// Absent for index 0.
    pub pillar: Option<GanZhi>,
    pub xun: Option<GanZhi>,
    pub years: Vec<FortuneYear>,
}

/// The full decade cycle of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneTimeline {
    /// Periods run forward along the sexagenary cycle.
    pub forward: bool,
    /// Distance from birth to onset.
    pub offset: OnsetOffset,
    pub onset: NaiveDateTime,
    /// Age in whole years at onset: onset year minus birth year.
    pub onset_age: i32,
    pub periods: Vec<FortunePeriod>,
}

impl FortuneTimeline {
    pub fn years(&self) -> impl Iterator<Item = &FortuneYear> {
        self.periods.iter().flat_map(|p| p.years.iter())
    }

    pub fn year(&self, year: i32) -> Option<&FortuneYear> {
        self.years().find(|y| y.year == year)
    }

    /// Period covering a calendar year.
    pub fn period_of(&self, year: i32) -> Option<&FortunePeriod> {
        self.periods
            .iter()
            .find(|p| (p.start_year..=p.end_year).contains(&year))
    }
}
