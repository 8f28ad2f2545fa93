//! Apparent geocentric solar longitude.
//!
//! Heliocentric Earth longitude from a truncated VSOP87D series, flipped by
//! 180°, then corrected to FK5, for nutation in longitude (four main terms)
//! and for annual aberration. Agreement with full theory is within a few
//! arcseconds for 1800–2200, i.e. solar-term instants within ~10 seconds.
//!
//! Source: Meeus, *Astronomical Algorithms* (2nd ed.), ch. 22, 25, 32 and
//! Appendix III. ΔT polynomials from Espenak & Meeus (NASA, 2006).

use std::f64::consts::TAU;

use bazi_time::J2000_JD;

/// Arcseconds to degrees.
const AS2DEG: f64 = 1.0 / 3600.0;

/// Days per Julian millennium.
const DAYS_PER_MILLENNIUM: f64 = 365_250.0;

/// Mean tropical year in days.
pub const TROPICAL_YEAR_DAYS: f64 = 365.242_189;

// Rows: [A, B, C] with term = A·cos(B + C·τ), A in 1e-8 rad.
#[rustfmt::skip]
static EARTH_L0: [[f64; 3]; 64] = [
    [175_347_046.0, 0.0, 0.0],
    [3_341_656.0, 4.669_256_8, 6_283.075_85],
    [34_894.0, 4.626_10, 12_566.151_70],
    [3_497.0, 2.744_1, 5_753.384_9],
    [3_418.0, 2.828_9, 3.523_1],
    [3_136.0, 3.627_7, 77_713.771_5],
    [2_676.0, 4.418_1, 7_860.419_4],
    [2_343.0, 6.135_2, 3_930.209_7],
    [1_324.0, 0.742_5, 11_506.769_8],
    [1_273.0, 2.037_1, 529.691_0],
    [1_199.0, 1.109_6, 1_577.343_5],
    [990.0, 5.233, 5_884.927],
    [902.0, 2.045, 26.298],
    [857.0, 3.508, 398.149],
    [780.0, 1.179, 5_223.694],
    [753.0, 2.533, 5_507.553],
    [505.0, 4.583, 18_849.228],
    [492.0, 4.205, 775.523],
    [357.0, 2.920, 0.067],
    [317.0, 5.849, 11_790.629],
    [284.0, 1.899, 796.298],
    [271.0, 0.315, 10_977.079],
    [243.0, 0.345, 5_486.778],
    [206.0, 4.806, 2_544.314],
    [205.0, 1.869, 5_573.143],
    [202.0, 2.458, 6_069.777],
    [156.0, 0.833, 213.299],
    [132.0, 3.411, 2_942.463],
    [126.0, 1.083, 20.775],
    [115.0, 0.645, 0.980],
    [103.0, 0.636, 4_694.003],
    [102.0, 0.976, 15_720.839],
    [102.0, 4.267, 7.114],
    [99.0, 6.21, 2_146.17],
    [98.0, 0.68, 155.42],
    [86.0, 5.98, 161_000.69],
    [85.0, 1.30, 6_275.96],
    [85.0, 3.67, 71_430.70],
    [80.0, 1.81, 17_260.15],
    [79.0, 3.04, 12_036.46],
    [75.0, 1.76, 5_088.63],
    [74.0, 3.50, 3_154.69],
    [74.0, 4.68, 801.82],
    [70.0, 0.83, 9_437.76],
    [62.0, 3.98, 8_827.39],
    [61.0, 1.82, 7_084.90],
    [57.0, 2.78, 6_286.60],
    [56.0, 4.39, 14_143.50],
    [56.0, 3.47, 6_279.55],
    [52.0, 0.19, 12_139.55],
    [52.0, 1.33, 1_748.02],
    [51.0, 0.28, 5_856.48],
    [49.0, 0.49, 1_194.45],
    [41.0, 5.37, 8_429.24],
    [41.0, 2.40, 19_651.05],
    [39.0, 6.17, 10_447.39],
    [37.0, 6.04, 10_213.29],
    [37.0, 2.57, 1_059.38],
    [36.0, 1.71, 2_352.87],
    [36.0, 1.78, 6_812.77],
    [33.0, 0.59, 17_789.85],
    [30.0, 0.44, 83_996.85],
    [30.0, 2.74, 1_349.87],
    [25.0, 3.16, 4_690.48],
];

#[rustfmt::skip]
static EARTH_L1: [[f64; 3]; 34] = [
    [628_331_966_747.0, 0.0, 0.0],
    [206_059.0, 2.678_235, 6_283.075_85],
    [4_303.0, 2.635_1, 12_566.151_7],
    [425.0, 1.590, 3.523],
    [119.0, 5.796, 26.298],
    [109.0, 2.966, 1_577.344],
    [93.0, 2.59, 18_849.23],
    [72.0, 1.14, 529.69],
    [68.0, 1.87, 398.15],
    [67.0, 4.41, 5_507.55],
    [59.0, 2.89, 5_223.69],
    [56.0, 2.17, 155.42],
    [45.0, 0.40, 796.30],
    [36.0, 0.47, 775.52],
    [29.0, 2.65, 7.11],
    [21.0, 5.34, 0.98],
    [19.0, 1.85, 5_486.78],
    [19.0, 4.97, 213.30],
    [17.0, 2.99, 6_275.96],
    [16.0, 0.03, 2_544.31],
    [16.0, 1.43, 2_146.17],
    [15.0, 1.21, 10_977.08],
    [12.0, 2.83, 1_748.02],
    [12.0, 3.26, 5_088.63],
    [12.0, 5.27, 1_194.45],
    [12.0, 2.08, 4_694.00],
    [11.0, 0.77, 553.57],
    [10.0, 1.30, 6_286.60],
    [10.0, 4.24, 1_349.87],
    [9.0, 2.70, 242.73],
    [9.0, 5.64, 951.72],
    [8.0, 5.30, 2_352.87],
    [6.0, 2.65, 9_437.76],
    [6.0, 4.67, 4_690.48],
];

#[rustfmt::skip]
static EARTH_L2: [[f64; 3]; 20] = [
    [52_919.0, 0.0, 0.0],
    [8_720.0, 1.072_1, 6_283.075_8],
    [309.0, 0.867, 12_566.152],
    [27.0, 0.05, 3.52],
    [16.0, 5.19, 26.30],
    [16.0, 3.68, 155.42],
    [10.0, 0.76, 18_849.23],
    [9.0, 2.06, 77_713.77],
    [7.0, 0.83, 775.52],
    [5.0, 4.66, 1_577.34],
    [4.0, 1.03, 7.11],
    [4.0, 3.44, 5_573.14],
    [3.0, 5.14, 796.30],
    [3.0, 6.05, 5_507.55],
    [3.0, 1.19, 242.73],
    [3.0, 6.12, 529.69],
    [3.0, 0.31, 398.15],
    [3.0, 2.28, 553.57],
    [2.0, 4.38, 5_223.69],
    [2.0, 3.75, 0.98],
];

#[rustfmt::skip]
static EARTH_L3: [[f64; 3]; 7] = [
    [289.0, 5.844, 6_283.076],
    [35.0, 0.0, 0.0],
    [17.0, 5.49, 12_566.15],
    [3.0, 5.20, 155.42],
    [1.0, 4.72, 3.52],
    [1.0, 5.30, 18_849.23],
    [1.0, 5.97, 242.73],
];

#[rustfmt::skip]
static EARTH_L4: [[f64; 3]; 3] = [
    [114.0, 3.142, 0.0],
    [8.0, 4.13, 6_283.08],
    [1.0, 3.84, 12_566.15],
];

#[rustfmt::skip]
static EARTH_L5: [[f64; 3]; 1] = [
    [1.0, 3.14, 0.0],
];

fn series(terms: &[[f64; 3]], tau: f64) -> f64 {
    terms.iter().map(|[a, b, c]| a * (b + c * tau).cos()).sum()
}

/// Heliocentric ecliptic longitude of the Earth in radians (mean equinox
/// of date, VSOP87D), wrapped to [0, 2π).
fn earth_longitude_rad(jd_tt: f64) -> f64 {
    let tau = (jd_tt - J2000_JD) / DAYS_PER_MILLENNIUM;
    let l = series(&EARTH_L0, tau)
        + tau
            * (series(&EARTH_L1, tau)
                + tau
                    * (series(&EARTH_L2, tau)
                        + tau
                            * (series(&EARTH_L3, tau)
                                + tau * (series(&EARTH_L4, tau) + tau * series(&EARTH_L5, tau)))));
    (l / 1e8).rem_euclid(TAU)
}

/// Nutation in longitude in arcseconds (four largest terms).
pub fn nutation_longitude_arcsec(jd_tt: f64) -> f64 {
    let t = bazi_time::centuries_since_j2000(jd_tt);
    let omega = (125.044_52 - 1_934.136_261 * t).to_radians();
    let l_sun = (280.466_5 + 36_000.769_8 * t).to_radians();
    let l_moon = (218.316_5 + 481_267.881_3 * t).to_radians();
    -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin()
}

/// Apparent geocentric solar longitude in degrees [0, 360) at `jd_tt`.
pub fn apparent_longitude_deg(jd_tt: f64) -> f64 {
    let geometric = earth_longitude_rad(jd_tt).to_degrees() + 180.0;
    let fk5 = -0.090_33 * AS2DEG;
    let nutation = nutation_longitude_arcsec(jd_tt) * AS2DEG;
    let aberration = -20.489_8 * AS2DEG;
    (geometric + fk5 + nutation + aberration).rem_euclid(360.0)
}

/// ΔT = TT − UT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match year {
        y if (1800.0..1860.0).contains(&y) => {
            let t = y - 1800.0;
            13.72 - 0.332_447 * t + 0.006_861_2 * t.powi(2) + 0.004_111_6 * t.powi(3)
                - 0.000_374_36 * t.powi(4)
                + 0.000_012_127_2 * t.powi(5)
                - 0.000_000_169_9 * t.powi(6)
                + 0.000_000_000_875 * t.powi(7)
        }
        y if (1860.0..1900.0).contains(&y) => {
            let t = y - 1860.0;
            7.62 + 0.573_7 * t - 0.251_754 * t.powi(2) + 0.016_806_68 * t.powi(3)
                - 0.000_447_362_4 * t.powi(4)
                + t.powi(5) / 233_174.0
        }
        y if (1900.0..1920.0).contains(&y) => {
            let t = y - 1900.0;
            -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
                - 0.000_197 * t.powi(4)
        }
        y if (1920.0..1941.0).contains(&y) => {
            let t = y - 1920.0;
            21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
        }
        y if (1941.0..1961.0).contains(&y) => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2_547.0
        }
        y if (1961.0..1986.0).contains(&y) => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if (1986.0..2005.0).contains(&y) => {
            let t = y - 2000.0;
            63.86 + 0.334_5 * t - 0.060_374 * t.powi(2)
                + 0.001_727_5 * t.powi(3)
                + 0.000_651_814 * t.powi(4)
                + 0.000_023_735_99 * t.powi(5)
        }
        y if (2005.0..2050.0).contains(&y) => {
            let t = y - 2000.0;
            62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
        }
        y if (2050.0..2150.0).contains(&y) => long_term(y) - 0.562_8 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Decimal year of a Julian Date (close enough for ΔT lookup).
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// Convert a UT Julian Date to TT.
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(decimal_year(jd_ut)) / 86_400.0
}

/// Convert a TT Julian Date to UT.
pub fn tt_to_ut(jd_tt: f64) -> f64 {
    jd_tt - delta_t_seconds(decimal_year(jd_tt)) / 86_400.0
}

/// Apparent solar longitude in degrees at a UT Julian Date.
pub fn apparent_longitude_at_ut(jd_ut: f64) -> f64 {
    apparent_longitude_deg(ut_to_tt(jd_ut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_25b() {
        // 1992-10-13 0h TD: apparent λ = 199°54'21.818" (VSOP87 full series).
        let lon = apparent_longitude_deg(2_448_908.5);
        let expected = 199.0 + 54.0 / 60.0 + 21.818 / 3600.0;
        assert!((lon - expected).abs() < 5.0 * AS2DEG, "got {lon}");
    }

    #[test]
    fn j2000_is_near_280() {
        let lon = apparent_longitude_deg(J2000_JD);
        assert!((lon - 280.37).abs() < 0.02, "got {lon}");
    }

    #[test]
    fn delta_t_modern_values() {
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 1e-9);
        assert!((delta_t_seconds(1990.0) - 56.9).abs() < 0.5);
        assert!((delta_t_seconds(1900.0) + 2.79).abs() < 1e-9);
    }

    #[test]
    fn ut_tt_round_trip() {
        let ut = 2_451_545.25;
        assert!((tt_to_ut(ut_to_tt(ut)) - ut).abs() < 1e-8);
    }
}
