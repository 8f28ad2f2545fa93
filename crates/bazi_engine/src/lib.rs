//! Four-pillar chart arrangement.
//!
//! This crate provides:
//! - Birth specifications, the location gazetteer and TOML engine configuration
//! - Calendar normalization with daylight-saving and solar-time correction
//! - Annotated four pillars, month command, element energy and interactions
//! - Pattern classification, strength verdict and star markers
//! - The decade fortune timeline with on-demand month/day expansion
//! - [`Engine::arrange`], which runs every stage and records an audit trail
//!
//! Calendar arithmetic is delegated to a
//! [`CalendarPrimitive`](bazi_almanac::CalendarPrimitive); the default is
//! [`Almanac`](bazi_almanac::Almanac).

pub mod auxiliary;
pub mod birth;
pub mod chart;
pub mod command;
pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod fortune;
pub mod fortune_types;
pub mod geju;
pub mod interactions;
pub mod location;
pub mod normalize;
pub mod pillars;
pub mod stars;
pub mod strength;
pub mod trace;

pub use auxiliary::{AuxiliaryPalaces, Palace};
pub use birth::{BirthPlace, BirthSpecification, CalendarKind, ChartConfig, DEFAULT_PLACE, MonthMode};
pub use chart::ChartResult;
pub use command::MonthCommand;
pub use config::{DEFAULT_DECADE_COUNT, EngineConfig};
pub use energy::{ElementScore, EnergyProfile};
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use fortune::{expand_year, minor_fortune};
pub use fortune_types::{FortuneDay, FortuneMonth, FortunePeriod, FortuneTimeline, FortuneYear};
pub use geju::{CompoundPattern, GejuCategory, GejuClassification, GejuStatus};
pub use interactions::{Interaction, InteractionKind, TransformationCheck};
pub use location::{Gazetteer, LocationEntry, LocationSource, ResolvedLocation};
pub use normalize::CorrectedInstant;
pub use pillars::{ALL_POSITIONS, FourPillars, HiddenStem, Pillar, Position};
pub use stars::Star;
pub use strength::{RoleLogic, StrengthLevel, StrengthVerdict};
pub use trace::{Stage, TraceStep, Tracer};

pub use bazi_almanac::{Gender, HourBoundaryMode};
pub use bazi_time::TimeMode;
