//! Fixed alphabets and lookup tables for four-pillar (八字) charts.
//!
//! This crate provides:
//! - The 10 stems, 12 branches and 5 elements with their polarity
//! - Sexagenary pairs with decade heads, void pairs and na-yin
//! - Hidden stems, ten-god relations, twelve life stages, seasonal status
//! - Month-command sub-periods and the 24 solar terms
//! - Stem combinations, branch clashes and the star catalogue
//!
//! Everything here is pure data keyed by enums; no time or calendar logic.

pub mod branch;
pub mod command;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod life_stage;
pub mod relation;
pub mod season;
pub mod solar_term;
pub mod star;
pub mod stem;
pub mod ten_god;

pub use branch::{ALL_BRANCHES, Branch, HiddenDepth};
pub use command::{COMMAND_MONTH_DAYS, CommandLookup, CommandSpan, command_spans, commanding_stem};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use error::BaseError;
pub use ganzhi::{GANZHI_EPOCH_YEAR, GanZhi, NaYin};
pub use life_stage::{ALL_LIFE_STAGES, LifeStage, life_stage, nascent_branch};
pub use relation::{BRANCH_CLASHES, STEM_COMBINATIONS, branches_clash, stem_combination};
pub use season::{ALL_SEASONAL_STATUSES, SeasonalStatus, seasonal_status};
pub use solar_term::{ALL_SOLAR_TERMS, SolarTerm};
pub use star::{
    StarKind, VirtueTarget, blocked_road_hours, heaven_virtue, heavenly_noble, month_virtue,
    romance, travel_horse,
};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{TenGod, TenGodFamily};
