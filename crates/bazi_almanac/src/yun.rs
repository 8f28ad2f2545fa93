//! Decade cycle (大运): direction, onset and period enumeration.
//!
//! Direction is forward for a yang year stem with a male birth or a yin year
//! stem with a female birth, backward otherwise. The onset distance is
//! measured from birth to the next sectional term (forward) or from the
//! previous one to birth (backward) in whole days and double hours, then
//! scaled: 3 days = 1 year, 1 day = 4 months, 1 double hour = 10 days.

use bazi_base::{Branch, GanZhi, Polarity};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::error::AlmanacError;
use crate::pillars::{month_ganzhi, year_ganzhi};
use crate::primitive::{Gender, OnsetOffset, RawDecadeCycle, RawDecadePeriod};
use crate::terms::sectional_context;

/// Years per decade period.
pub const DECADE_YEARS: i32 = 10;

/// Double-hour index used for onset counting; 23:00 counts as the last slot.
fn onset_slot(t: &NaiveDateTime) -> i64 {
    match t.hour() {
        23 => 11,
        h => i64::from(Branch::for_hour(h).index()),
    }
}

/// Onset offset between two instants (`from` earlier than `to`).
pub fn onset_offset(from: &NaiveDateTime, to: &NaiveDateTime) -> OnsetOffset {
    let mut hour_diff = onset_slot(to) - onset_slot(from);
    let mut day_diff = (to.date() - from.date()).num_days();
    if hour_diff < 0 {
        hour_diff += 12;
        day_diff -= 1;
    }
    let month_diff = hour_diff * 10 / 30;
    let total_months = day_diff * 4 + month_diff;
    let days = hour_diff * 10 - month_diff * 30;
    let years = total_months / 12;
    OnsetOffset {
        years: years.max(0) as u32,
        months: (total_months - years * 12).max(0) as u32,
        days: days.max(0) as u32,
        hours: 0,
    }
}

fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Birth instant advanced by the onset offset.
pub fn onset_instant(birth: NaiveDateTime, offset: &OnsetOffset) -> Option<NaiveDateTime> {
    let date = add_years(birth.date(), offset.years)?
        .checked_add_months(Months::new(offset.months))?
        .checked_add_days(Days::new(u64::from(offset.days)))?;
    Some(date.and_time(birth.time()))
}

/// Whether the cycle runs forward for this year pillar and gender.
pub fn runs_forward(year: GanZhi, gender: Gender) -> bool {
    matches!(
        (year.stem.polarity(), gender),
        (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female)
    )
}

/// Decade cycle of a birth instant with `count` periods (index 0 included).
pub fn decade_cycle(
    birth: NaiveDateTime,
    gender: Gender,
    count: usize,
) -> Result<RawDecadeCycle, AlmanacError> {
    let year = year_ganzhi(birth)?;
    let month = month_ganzhi(birth, year)?;
    let forward = runs_forward(year, gender);

    let ctx = sectional_context(birth)?;
    let offset = if forward {
        onset_offset(&birth, &ctx.next.instant)
    } else {
        onset_offset(&ctx.prev.instant, &birth)
    };
    let onset = onset_instant(birth, &offset)
        .ok_or(AlmanacError::YearOutOfRange(birth.year()))?;

    let birth_year = birth.year();
    let onset_year = onset.year();
    let step: i64 = if forward { 1 } else { -1 };

    let periods = (0..count as u32)
        .map(|index| {
            if index == 0 {
                RawDecadePeriod {
                    index,
                    start_year: birth_year,
                    end_year: onset_year - 1,
                    start_age: 1,
                    end_age: onset_year - birth_year,
                    pillar: None,
                }
            } else {
                let start_year = onset_year + DECADE_YEARS * (index as i32 - 1);
                let start_age = start_year - birth_year + 1;
                RawDecadePeriod {
                    index,
                    start_year,
                    end_year: start_year + DECADE_YEARS - 1,
                    start_age,
                    end_age: start_age + DECADE_YEARS - 1,
                    pillar: Some(month.shift(step * i64::from(index))),
                }
            }
        })
        .collect();

    tracing::debug!(
        forward,
        years = offset.years,
        months = offset.months,
        days = offset.days,
        %onset,
        "decade cycle onset"
    );
    Ok(RawDecadeCycle {
        forward,
        offset,
        onset,
        periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_time::parse_civil;

    #[test]
    fn offset_arithmetic() {
        // 25 days, same double hour: 100 months = 8 years 4 months.
        let from = parse_civil("1989-12-07 11:20:00").unwrap();
        let to = parse_civil("1990-01-01 12:02:10").unwrap();
        let o = onset_offset(&from, &to);
        assert_eq!((o.years, o.months, o.days), (8, 4, 0));
    }

    #[test]
    fn offset_borrows_a_day_for_negative_hours() {
        // 10 double hours short of 3 days: 2 days + 10 slots.
        let from = parse_civil("2000-01-01 22:00:00").unwrap();
        let to = parse_civil("2000-01-04 18:00:00").unwrap();
        let o = onset_offset(&from, &to);
        // hour_diff = 9 - 11 + 12 = 10, day_diff = 2, month_diff = 3, days = 10.
        assert_eq!((o.years, o.months, o.days), (0, 11, 10));
    }

    #[test]
    fn direction_rules() {
        let yang: GanZhi = "甲子".parse().unwrap();
        let yin: GanZhi = "己巳".parse().unwrap();
        assert!(runs_forward(yang, Gender::Male));
        assert!(!runs_forward(yang, Gender::Female));
        assert!(!runs_forward(yin, Gender::Male));
        assert!(runs_forward(yin, Gender::Female));
    }

    #[test]
    fn male_1990_runs_backward() {
        let birth = parse_civil("1990-01-01 12:02:10").unwrap();
        let cycle = decade_cycle(birth, Gender::Male, 10).unwrap();
        assert!(!cycle.forward);
        assert_eq!(cycle.periods.len(), 10);
        assert_eq!(cycle.periods[0].pillar, None);
        assert_eq!(cycle.periods[1].pillar.map(|g| g.to_string()), Some("乙亥".into()));
        assert_eq!(cycle.periods[2].pillar.map(|g| g.to_string()), Some("甲戌".into()));
        assert!((7..=9).contains(&cycle.offset.years));
        let p1 = cycle.periods[1];
        assert_eq!(p1.start_year, cycle.onset.year());
        assert_eq!(p1.start_age, p1.start_year - 1990 + 1);
        assert_eq!(cycle.periods[2].start_year, p1.start_year + 10);
        assert_eq!(cycle.periods[0].end_year, p1.start_year - 1);
    }

    #[test]
    fn female_1990_runs_forward() {
        let birth = parse_civil("1990-01-01 12:02:10").unwrap();
        let cycle = decade_cycle(birth, Gender::Female, 3).unwrap();
        assert!(cycle.forward);
        assert_eq!(cycle.periods[1].pillar.map(|g| g.to_string()), Some("丁丑".into()));
        // Next sectional term (小寒) is 4 days away: onset around 1 year 4 months.
        assert_eq!(cycle.offset.years, 1);
    }
}
