//! Calendar primitive for four-pillar charts.
//!
//! This crate provides:
//! - Apparent solar longitude (truncated VSOP87D + nutation + aberration)
//! - True new moons (Meeus, ch. 49) and the Chinese lunisolar calendar
//! - Solar-term instants and the sectional terms bracketing an instant
//! - Raw year/month/day/hour pillars with the 立春 and late-zi rules
//! - The gendered decade cycle with its onset offset
//!
//! All instants are wall clock in the UTC+8 reference zone. The engine
//! consumes this crate through the [`CalendarPrimitive`] trait; [`Almanac`]
//! is the reference implementation.

pub mod almanac;
pub mod error;
pub mod lunisolar;
pub mod moon;
pub mod pillars;
pub mod primitive;
pub mod sun;
pub mod terms;
pub mod yun;

/// First civil year the series are evaluated for.
pub const MIN_YEAR: i32 = 1800;
/// Last civil year the series are evaluated for.
pub const MAX_YEAR: i32 = 2199;

pub use almanac::Almanac;
pub use error::AlmanacError;
pub use lunisolar::{LunarMonth, leap_month, lunar_year_months};
pub use primitive::{
    CalendarPrimitive, Gender, HourBoundaryMode, LunarDate, OnsetOffset, RawDecadeCycle,
    RawDecadePeriod, RawPillar, RawPillars, TermBoundary, TermContext,
};
pub use terms::{sectional_context, term_boundary};
pub use yun::DECADE_YEARS;
