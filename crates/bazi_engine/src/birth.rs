//! Birth specification: what the caller asks the engine to arrange.

use bazi_almanac::{Gender, HourBoundaryMode};
use bazi_time::TimeMode;
use serde::{Deserialize, Serialize};

/// Calendar the birth literal is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CalendarKind {
    #[default]
    Solar,
    /// Chinese lunisolar date; `leap_month` selects the intercalary month.
    Lunisolar { leap_month: bool },
}

/// How the month pillar is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthMode {
    /// Months open at the 12 sectional terms (节).
    #[default]
    SolarTerm,
    /// Months follow the lunisolar month of the birth date.
    LunarMonth,
}

/// Configuration bundle carried by each specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub time_mode: TimeMode,
    pub month_mode: MonthMode,
    pub hour_boundary_mode: HourBoundaryMode,
}

/// Where the birth took place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthPlace {
    /// Degrees east / north.
    Coordinates { longitude: f64, latitude: f64 },
    /// A gazetteer name such as `上海`.
    Named(String),
}

impl Default for BirthPlace {
    fn default() -> Self {
        Self::Named(DEFAULT_PLACE.to_string())
    }
}

/// Place assumed when the caller gives none.
pub const DEFAULT_PLACE: &str = "北京";

/// An immutable birth specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthSpecification {
    pub name: Option<String>,
    pub calendar: CalendarKind,
    /// `YYYY-MM-DD HH:MM:SS`, wall clock at the birth place.
    pub datetime: String,
    pub gender: Gender,
    pub place: BirthPlace,
    pub config: ChartConfig,
}

impl BirthSpecification {
    /// Solar-calendar birth with default gender, place and configuration.
    pub fn solar(datetime: impl Into<String>) -> Self {
        Self {
            name: None,
            calendar: CalendarKind::Solar,
            datetime: datetime.into(),
            gender: Gender::default(),
            place: BirthPlace::default(),
            config: ChartConfig::default(),
        }
    }

    /// Lunisolar birth; month and day of `datetime` are lunar.
    pub fn lunisolar(datetime: impl Into<String>, leap_month: bool) -> Self {
        Self {
            calendar: CalendarKind::Lunisolar { leap_month },
            ..Self::solar(datetime)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_coordinates(mut self, longitude: f64, latitude: f64) -> Self {
        self.place = BirthPlace::Coordinates {
            longitude,
            latitude,
        };
        self
    }

    pub fn with_place(mut self, name: impl Into<String>) -> Self {
        self.place = BirthPlace::Named(name.into());
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }
}
