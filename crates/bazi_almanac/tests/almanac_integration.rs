//! Integration tests for the reference calendar primitive.
//!
//! Reference instants are published Purple Mountain Observatory times (UTC+8).

use bazi_almanac::{
    Almanac, AlmanacError, CalendarPrimitive, Gender, HourBoundaryMode, LunarDate,
};
use bazi_base::{GanZhi, SolarTerm};
use bazi_time::parse_civil;
use chrono::{Datelike, Days, NaiveDate};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn published_term_instants_within_two_minutes() {
    let almanac = Almanac::new();
    let cases = [
        (2024, SolarTerm::LiChun, "2024-02-04 16:27:08"),
        (2000, SolarTerm::DongZhi, "2000-12-21 21:37:00"),
        (2023, SolarTerm::ChunFen, "2023-03-21 05:24:00"),
        (2021, SolarTerm::XiaZhi, "2021-06-21 11:32:00"),
    ];
    for (year, term, published) in cases {
        let got = almanac.term_instant(year, term).unwrap();
        let want = parse_civil(published).unwrap();
        assert!(
            (got - want).num_seconds().abs() <= 120,
            "{} {year}: got {got}, want {want}",
            term.name()
        );
    }
}

#[test]
fn lunar_round_trip_over_two_years() {
    let almanac = Almanac::new();
    let mut date = ymd(2022, 12, 1);
    let end = ymd(2024, 12, 31);
    while date <= end {
        let lunar = almanac.solar_to_lunar(date).unwrap();
        assert_eq!(almanac.lunar_to_solar(lunar).unwrap(), date, "{lunar}");
        date = date.checked_add_days(Days::new(7)).unwrap();
    }
}

#[test]
fn day_pillars_advance_by_one() {
    let almanac = Almanac::new();
    let mut prev = almanac.day_pillar(ymd(1999, 12, 31));
    let mut date = ymd(2000, 1, 1);
    for _ in 0..120 {
        let p = almanac.day_pillar(date);
        let prev_gz = GanZhi::new(prev.stem, prev.branch).unwrap();
        let gz = GanZhi::new(p.stem, p.branch).unwrap();
        assert_eq!(prev_gz.shift(1), gz);
        prev = p;
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn month_pillar_follows_term_context() {
    let almanac = Almanac::new();
    for month in 1..=12 {
        let t = parse_civil(&format!("2024-{month:02}-20 12:00:00")).unwrap();
        let ctx = almanac.term_context(t).unwrap();
        let p = almanac.raw_pillars(t, HourBoundaryMode::LateZiSameDay).unwrap();
        assert_eq!(p.month.branch, ctx.prev.term.month_branch(), "month {month}");
        assert!(ctx.prev.term.is_sectional() && ctx.next.term.is_sectional());
    }
}

#[test]
fn decade_cycle_periods_are_contiguous() {
    let almanac = Almanac::new();
    let birth = parse_civil("1984-06-15 08:30:00").unwrap();
    let cycle = almanac.decade_cycle(birth, Gender::Male, 10).unwrap();
    // 甲子 year, male: forward.
    assert!(cycle.forward);
    for w in cycle.periods.windows(2) {
        assert_eq!(w[0].end_year + 1, w[1].start_year);
        assert_eq!(w[0].end_age + 1, w[1].start_age);
    }
    assert_eq!(cycle.periods[0].start_year, birth.year());
    assert_eq!(cycle.periods[1].start_year, cycle.onset.year());
}

#[test]
fn years_outside_series_are_rejected() {
    let almanac = Almanac::new();
    assert!(matches!(
        almanac.term_instant(2500, SolarTerm::LiChun),
        Err(AlmanacError::YearOutOfRange(2500))
    ));
    assert!(almanac.lunar_to_solar(LunarDate::new(1700, 1, false, 1)).is_err());
}
