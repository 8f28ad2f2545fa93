//! Birth-time handling for four-pillar charts.
//!
//! This crate provides:
//! - Parsing of `YYYY-MM-DD HH:MM:SS` birth literals
//! - Julian Date conversions in UTC and in the UTC+8 reference zone
//! - The historical China daylight-saving table
//! - True/mean solar time (longitude offset + equation of time)

pub mod civil;
pub mod dst;
pub mod error;
pub mod julian;
pub mod solar_time;

pub use civil::{
    CIVIL_FORMAT, CivilFields, REFERENCE_ZONE_HOURS, floor_to_second, format_civil, parse_civil,
    parse_fields, shift_seconds,
};
pub use dst::{DST_OFFSET_SECONDS, DstCorrection, DstWindow, china_dst_windows, correct_dst};
pub use error::TimeError;
pub use julian::{
    J2000_JD, centuries_since_j2000, date_from_jdn, jd_from_reference, jd_from_utc, jdn,
    reference_from_jd, utc_from_jd,
};
pub use solar_time::{
    REFERENCE_LONGITUDE_DEG, SolarTimeCorrection, TimeMode, equation_of_time_minutes,
    longitude_offset_minutes, solar_time,
};
