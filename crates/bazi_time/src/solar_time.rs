//! True/mean solar time.
//!
//! True solar time adds two corrections to the zone clock: the longitude
//! offset from the 120°E reference meridian (4 minutes per degree) and the
//! equation of time for the day of year.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::civil::shift_seconds;
use crate::error::TimeError;

/// Reference meridian of the civil zone, degrees east.
pub const REFERENCE_LONGITUDE_DEG: f64 = 120.0;

/// Clock minutes per degree of longitude.
const MINUTES_PER_DEGREE: f64 = 4.0;

/// Which solar time the pillars are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// Apply longitude and equation-of-time corrections.
    #[default]
    TrueSolar,
    /// Use the zone clock unchanged.
    MeanSolar,
}

/// Equation of time in minutes for a 1-based day of year.
///
/// `9.87·sin(2B) − 7.67·sin(B + 78.7°)` with `B = 360°·(n − 81)/365`.
pub fn equation_of_time_minutes(day_of_year: u32) -> f64 {
    let b = (360.0 * (f64::from(day_of_year) - 81.0) / 365.0).to_radians();
    9.87 * (2.0 * b).sin() - 7.67 * (b + 78.7_f64.to_radians()).sin()
}

/// Longitude offset in minutes, positive east of the reference meridian.
pub fn longitude_offset_minutes(longitude_deg: f64) -> f64 {
    (longitude_deg - REFERENCE_LONGITUDE_DEG) * MINUTES_PER_DEGREE
}

/// Breakdown of a solar-time correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarTimeCorrection {
    pub corrected: NaiveDateTime,
    pub equation_of_time_min: f64,
    pub longitude_offset_min: f64,
    /// False in mean-solar mode, where the input passes through.
    pub applied: bool,
}

impl SolarTimeCorrection {
    pub fn total_offset_min(&self) -> f64 {
        self.equation_of_time_min + self.longitude_offset_min
    }
}

/// Convert a zone-clock timestamp to solar time at `longitude_deg`.
///
/// Corrections are always computed for reporting; they are added to the
/// timestamp only in [`TimeMode::TrueSolar`].
pub fn solar_time(
    t: NaiveDateTime,
    longitude_deg: f64,
    mode: TimeMode,
) -> Result<SolarTimeCorrection, TimeError> {
    let eot = equation_of_time_minutes(t.date().ordinal());
    let lon = longitude_offset_minutes(longitude_deg);
    let (corrected, applied) = match mode {
        TimeMode::TrueSolar => (shift_seconds(t, (lon + eot) * 60.0)?, true),
        TimeMode::MeanSolar => (t, false),
    };
    Ok(SolarTimeCorrection {
        corrected,
        equation_of_time_min: eot,
        longitude_offset_min: lon,
        applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::parse_civil;

    #[test]
    fn eot_known_values() {
        // Early November peak (~+16 min) and mid-February trough (~-14 min).
        assert!(equation_of_time_minutes(307) > 15.0);
        assert!(equation_of_time_minutes(45) < -13.0);
    }

    #[test]
    fn reference_meridian_has_no_longitude_offset() {
        assert_eq!(longitude_offset_minutes(120.0), 0.0);
        assert!((longitude_offset_minutes(121.47) - 5.88).abs() < 1e-9);
        assert!((longitude_offset_minutes(116.4) + 14.4).abs() < 1e-9);
    }

    #[test]
    fn mean_solar_passes_through() {
        let t = parse_civil("1990-01-01 12:00:00").unwrap();
        let c = solar_time(t, 100.0, TimeMode::MeanSolar).unwrap();
        assert_eq!(c.corrected, t);
        assert!(!c.applied);
    }

    #[test]
    fn shanghai_new_year_noon() {
        // day 1: eot ≈ -3.70 min, longitude +5.88 min, 130.76 s in total.
        let t = parse_civil("1990-01-01 12:00:00").unwrap();
        let c = solar_time(t, 121.47, TimeMode::TrueSolar).unwrap();
        assert!(c.applied);
        assert_eq!(c.corrected, parse_civil("1990-01-01 12:02:10").unwrap());
    }

    #[test]
    fn monotonic_in_longitude() {
        let t = parse_civil("2001-06-15 08:30:00").unwrap();
        let mut prev = None;
        for step in 0..60 {
            let lon = 120.0 + f64::from(step) * 0.5;
            let c = solar_time(t, lon, TimeMode::TrueSolar).unwrap().corrected;
            if let Some(p) = prev {
                assert!(c > p, "lon {lon}");
            }
            prev = Some(c);
        }
    }
}
