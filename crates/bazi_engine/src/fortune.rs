//! Fortune timeline: decade periods with their yearly overlay, and on-demand
//! expansion of chosen years into solar-term months and days.
//!
//! Period 0 holds the years between birth and onset. Every year carries its
//! nominal age, year pillar and minor-fortune pillar; months and days are
//! left out until a caller expands a year range.

use std::ops::RangeInclusive;

use bazi_almanac::{AlmanacError, CalendarPrimitive, Gender, RawDecadePeriod};
use bazi_base::{ALL_SOLAR_TERMS, GanZhi, SolarTerm};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::error::EngineError;
use crate::fortune_types::{FortuneDay, FortuneMonth, FortunePeriod, FortuneTimeline, FortuneYear};
use crate::pillars::{FourPillars, validate};
use crate::trace::{Stage, Tracer};

/// Minor fortune (小运) at a nominal age: the hour pillar stepped by the age.
pub fn minor_fortune(hour: GanZhi, age: i32, forward: bool) -> GanZhi {
    let steps = i64::from(age);
    hour.shift(if forward { steps } else { -steps })
}

fn year_entry(year: i32, birth_year: i32, hour: GanZhi, forward: bool) -> FortuneYear {
    let age = year - birth_year + 1;
    let pillar = GanZhi::for_year(year);
    FortuneYear {
        year,
        age,
        pillar,
        xun: pillar.xun_head(),
        minor: minor_fortune(hour, age, forward),
        months: None,
    }
}

fn period_entry(
    raw: &RawDecadePeriod,
    birth_year: i32,
    hour: GanZhi,
    forward: bool,
) -> FortunePeriod {
    FortunePeriod {
        index: raw.index,
        start_year: raw.start_year,
        end_year: raw.end_year,
        start_age: raw.start_age,
        end_age: raw.end_age,
        pillar: raw.pillar,
        xun: raw.pillar.map(GanZhi::xun_head),
        years: (raw.start_year..=raw.end_year)
            .map(|y| year_entry(y, birth_year, hour, forward))
            .collect(),
    }
}

/// Build the unexpanded timeline of a birth instant.
pub fn fortune_timeline<C: CalendarPrimitive>(
    primitive: &C,
    instant: NaiveDateTime,
    pillars: &FourPillars,
    gender: Gender,
    count: usize,
    tracer: &mut Tracer,
) -> Result<FortuneTimeline, EngineError> {
    let raw = primitive.decade_cycle(instant, gender, count)?;
    let birth_year = instant.year();
    let hour = pillars.hour.ganzhi;
    let onset_age = raw.onset.year() - birth_year;

    tracer.record_value(
        Stage::Fortune,
        format!(
            "decade cycle runs {}, onset after {}y {}m {}d at {}",
            if raw.forward { "forward" } else { "backward" },
            raw.offset.years,
            raw.offset.months,
            raw.offset.days,
            raw.onset
        ),
        f64::from(onset_age),
    );

    Ok(FortuneTimeline {
        forward: raw.forward,
        offset: raw.offset,
        onset: raw.onset,
        onset_age,
        periods: raw
            .periods
            .iter()
            .map(|p| period_entry(p, birth_year, hour, raw.forward))
            .collect(),
    })
}

/// The 12 solar-term months of a pillar year, 立春 of `year` to 小寒 of `year + 1`.
pub fn expand_year<C: CalendarPrimitive>(
    primitive: &C,
    year: i32,
) -> Result<Vec<FortuneMonth>, EngineError> {
    let year_stem = GanZhi::for_year(year).stem;
    let mut openings: Vec<(SolarTerm, NaiveDateTime)> = Vec::with_capacity(13);
    for &term in ALL_SOLAR_TERMS.iter().filter(|t| t.is_sectional()) {
        if term != SolarTerm::XiaoHan {
            openings.push((term, primitive.term_instant(year, term)?));
        }
    }
    for term in [SolarTerm::XiaoHan, SolarTerm::LiChun] {
        openings.push((term, primitive.term_instant(year + 1, term)?));
    }

    let mut months = Vec::with_capacity(12);
    for (i, pair) in openings.windows(2).enumerate() {
        let (term, starts) = pair[0];
        let end = pair[1].1.date();
        months.push(FortuneMonth {
            index: (i + 1) as u8,
            term,
            starts,
            pillar: GanZhi::month_of(year_stem, term.month_branch()),
            days: month_days(primitive, starts.date(), end)?,
        });
    }
    Ok(months)
}

/// Civil days from `first` up to, not including, `end`.
fn month_days<C: CalendarPrimitive>(
    primitive: &C,
    first: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<FortuneDay>, EngineError> {
    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date < end {
        days.push(FortuneDay {
            date,
            pillar: validate(&primitive.day_pillar(date))?,
        });
        date = date
            .checked_add_days(Days::new(1))
            .ok_or(AlmanacError::YearOutOfRange(date.year()))?;
    }
    Ok(days)
}

/// Expand every timeline year inside `range`; years outside the timeline are skipped.
pub fn expand_timeline<C: CalendarPrimitive>(
    primitive: &C,
    timeline: &mut FortuneTimeline,
    range: RangeInclusive<i32>,
    tracer: &mut Tracer,
) -> Result<usize, EngineError> {
    let (from, to) = (*range.start(), *range.end());
    if from > to {
        return Err(EngineError::InvalidYearRange { from, to });
    }
    let mut expanded = 0;
    for year in timeline
        .periods
        .iter_mut()
        .flat_map(|p| p.years.iter_mut())
        .filter(|y| range.contains(&y.year))
    {
        year.months = Some(expand_year(primitive, year.year)?);
        expanded += 1;
    }
    tracer.record_value(
        Stage::Fortune,
        format!("expanded {expanded} year(s) in {from}..={to} to months and days"),
        expanded as f64,
    );
    Ok(expanded)
}
