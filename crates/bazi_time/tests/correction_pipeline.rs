//! Integration tests chaining literal parsing, DST removal and solar time.

use bazi_time::{TimeMode, correct_dst, parse_civil, solar_time};

#[test]
fn dst_birth_is_shifted_before_solar_time() {
    let t = parse_civil("1988-07-01 12:00:00").expect("valid literal");
    let dst = correct_dst(t).expect("in range");
    assert!(dst.applied());

    let mean = solar_time(dst.corrected, 120.0, TimeMode::MeanSolar).expect("in range");
    assert_eq!(mean.corrected, parse_civil("1988-07-01 11:00:00").unwrap());
}

#[test]
fn west_of_reference_runs_behind() {
    // Urumqi sits ~32.4° west of the reference meridian: over two hours behind.
    let t = parse_civil("2010-03-21 10:00:00").unwrap();
    let c = solar_time(t, 87.62, TimeMode::TrueSolar).unwrap();
    let behind = t - c.corrected;
    assert!(behind.num_minutes() > 120, "behind by {behind}");
    assert!(behind.num_minutes() < 140, "behind by {behind}");
}
