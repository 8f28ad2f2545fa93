//! Solar-term instants by root-finding on the apparent solar longitude.

use bazi_base::{ALL_SOLAR_TERMS, SolarTerm};
use bazi_time::{jd_from_reference, jd_from_utc, reference_from_jd};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::AlmanacError;
use crate::primitive::{TermBoundary, TermContext};
use crate::sun::{TROPICAL_YEAR_DAYS, apparent_longitude_at_ut};
use crate::{MAX_YEAR, MIN_YEAR};

/// Convergence tolerance in days (~1 ms).
const TOLERANCE_DAYS: f64 = 1e-8;
const MAX_ITERATIONS: usize = 40;

pub(crate) fn check_year(year: i32) -> Result<(), AlmanacError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(AlmanacError::YearOutOfRange(year))
    }
}

/// Signed angular difference `target - actual` wrapped to (-180, 180].
fn wrap_diff(target: f64, actual: f64) -> f64 {
    let d = (target - actual).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// UT Julian Date at which the apparent solar longitude equals `term`'s, in
/// civil `year`.
pub fn term_jd_ut(year: i32, term: SolarTerm) -> Result<f64, AlmanacError> {
    check_year(year)?;
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(AlmanacError::YearOutOfRange(year))?;
    // 小寒 falls around Jan 5-6; each term is ~15.2 days on.
    let mut jd = jd_from_utc(&jan1) + 5.5 + f64::from(term.index()) * TROPICAL_YEAR_DAYS / 24.0;
    let target = term.longitude_deg();
    for _ in 0..MAX_ITERATIONS {
        let diff = wrap_diff(target, apparent_longitude_at_ut(jd));
        let step = diff / 360.0 * TROPICAL_YEAR_DAYS;
        jd += step;
        if step.abs() < TOLERANCE_DAYS {
            return Ok(jd);
        }
    }
    Err(AlmanacError::NoConvergence("solar term"))
}

/// Reference-zone instant of `term` in civil `year`.
pub fn term_boundary(year: i32, term: SolarTerm) -> Result<TermBoundary, AlmanacError> {
    let jd = term_jd_ut(year, term)?;
    let instant = reference_from_jd(jd).ok_or(AlmanacError::YearOutOfRange(year))?;
    Ok(TermBoundary { term, instant })
}

/// The 12 sectional terms of a civil year in order (小寒 first).
pub fn sectional_terms(year: i32) -> Result<Vec<TermBoundary>, AlmanacError> {
    ALL_SOLAR_TERMS
        .iter()
        .filter(|t| t.is_sectional())
        .map(|&t| term_boundary(year, t))
        .collect()
}

/// Sectional terms bracketing a reference-zone instant.
pub fn sectional_context(instant: NaiveDateTime) -> Result<TermContext, AlmanacError> {
    let year = instant.year();
    let mut candidates = vec![term_boundary(year - 1, SolarTerm::DaXue)?];
    candidates.extend(sectional_terms(year)?);
    candidates.push(term_boundary(year + 1, SolarTerm::XiaoHan)?);

    let t = jd_from_reference(&instant);
    let pos = candidates
        .iter()
        .rposition(|b| jd_from_reference(&b.instant) <= t)
        .ok_or(AlmanacError::NoConvergence("sectional term bracket"))?;
    let next = candidates
        .get(pos + 1)
        .copied()
        .ok_or(AlmanacError::NoConvergence("sectional term bracket"))?;
    Ok(TermContext {
        prev: candidates[pos],
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_time::parse_civil;

    fn minutes_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
        (a - b).num_minutes().abs()
    }

    #[test]
    fn lichun_2024() {
        let b = term_boundary(2024, SolarTerm::LiChun).unwrap();
        let published = parse_civil("2024-02-04 16:27:08").unwrap();
        assert!(minutes_between(b.instant, published) <= 1, "got {}", b.instant);
    }

    #[test]
    fn winter_solstice_2000() {
        let b = term_boundary(2000, SolarTerm::DongZhi).unwrap();
        let published = parse_civil("2000-12-21 21:37:00").unwrap();
        assert!(minutes_between(b.instant, published) <= 1, "got {}", b.instant);
    }

    #[test]
    fn terms_are_increasing() {
        let all: Vec<_> = ALL_SOLAR_TERMS
            .iter()
            .map(|&t| term_boundary(1990, t).unwrap().instant)
            .collect();
        for w in all.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn context_before_first_term_of_year() {
        let t = parse_civil("1990-01-01 12:02:10").unwrap();
        let ctx = sectional_context(t).unwrap();
        assert_eq!(ctx.prev.term, SolarTerm::DaXue);
        assert_eq!(ctx.next.term, SolarTerm::XiaoHan);
        assert!(ctx.prev.instant < t && t < ctx.next.instant);
    }

    #[test]
    fn out_of_range_year() {
        assert!(matches!(
            term_jd_ut(1500, SolarTerm::LiChun),
            Err(AlmanacError::YearOutOfRange(1500))
        ));
    }
}
