//! Calendar normalization and time correction.
//!
//! Order matters: the literal is brought to the solar calendar first, the
//! daylight-saving hour is removed next, and solar time is applied last at
//! the resolved longitude.

use bazi_almanac::{CalendarPrimitive, LunarDate};
use bazi_time::{
    DstCorrection, SolarTimeCorrection, TimeError, correct_dst, format_civil, parse_civil,
    parse_fields, solar_time,
};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::birth::{BirthSpecification, CalendarKind};
use crate::error::EngineError;
use crate::location::{Gazetteer, ResolvedLocation};
use crate::trace::{Stage, Tracer};

/// The birth instant after every correction, with the steps that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedInstant {
    /// Solar-calendar wall clock before any correction.
    pub civil: NaiveDateTime,
    pub dst: DstCorrection,
    pub solar: SolarTimeCorrection,
    pub location: ResolvedLocation,
    /// Instant the pillars are read from.
    pub instant: NaiveDateTime,
}

/// Read the birth literal in the requested calendar as a solar wall clock.
pub fn to_solar<C: CalendarPrimitive>(
    primitive: &C,
    spec: &BirthSpecification,
) -> Result<NaiveDateTime, EngineError> {
    match spec.calendar {
        CalendarKind::Solar => Ok(parse_civil(&spec.datetime)?),
        CalendarKind::Lunisolar { leap_month } => {
            let f = parse_fields(&spec.datetime)?;
            let invalid = || {
                EngineError::from(TimeError::InvalidDateFormat {
                    literal: spec.datetime.clone(),
                })
            };
            let lunar = LunarDate::new(
                f.year,
                u8::try_from(f.month).map_err(|_| invalid())?,
                leap_month,
                u8::try_from(f.day).map_err(|_| invalid())?,
            );
            let date = primitive.lunar_to_solar(lunar)?;
            let time = f.time().ok_or_else(invalid)?;
            Ok(date.and_time(time))
        }
    }
}

/// Run the normalization stages in order.
pub fn normalize<C: CalendarPrimitive>(
    primitive: &C,
    spec: &BirthSpecification,
    gazetteer: &Gazetteer,
    tracer: &mut Tracer,
) -> Result<CorrectedInstant, EngineError> {
    let civil = to_solar(primitive, spec)?;
    if let CalendarKind::Lunisolar { leap_month } = spec.calendar {
        tracer.record(
            Stage::Preprocess,
            format!(
                "lunisolar {}{} converted to solar {}",
                if leap_month { "leap " } else { "" },
                spec.datetime,
                format_civil(&civil)
            ),
        );
    }

    let dst = correct_dst(civil)?;
    if dst.applied() {
        tracer.record_value(
            Stage::Preprocess,
            format!(
                "daylight saving in force, clock moved back to {}",
                format_civil(&dst.corrected)
            ),
            -1.0,
        );
    }

    let location = gazetteer.resolve(&spec.place, tracer)?;
    let solar = solar_time(dst.corrected, location.longitude, spec.config.time_mode)?;
    if solar.applied {
        tracer.record_value(
            Stage::Preprocess,
            format!(
                "true solar time {} (longitude {:+.2} min, equation of time {:+.2} min)",
                format_civil(&solar.corrected),
                solar.longitude_offset_min,
                solar.equation_of_time_min
            ),
            solar.total_offset_min(),
        );
    } else {
        tracer.record(Stage::Preprocess, "mean solar time, clock used as given");
    }

    Ok(CorrectedInstant {
        civil,
        dst,
        instant: solar.corrected,
        solar,
        location,
    })
}
