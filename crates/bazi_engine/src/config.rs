//! Engine configuration loaded from TOML.
//!
//! ```toml
//! decade_count = 10
//!
//! [defaults]
//! time_mode = "true_solar"
//! month_mode = "solar_term"
//! hour_boundary_mode = "late_zi_same_day"
//!
//! [[locations]]
//! name = "苏州"
//! longitude = 120.62
//! latitude = 31.30
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::birth::{BirthSpecification, ChartConfig};
use crate::error::ConfigError;
use crate::location::LocationEntry;

/// Decade periods enumerated when the config does not say (index 0 included).
pub const DEFAULT_DECADE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Modes carried by specifications built through [`EngineConfig::solar_spec`]
    /// and [`EngineConfig::lunisolar_spec`]. `Engine::arrange` itself reads
    /// only the specification it is given.
    pub defaults: ChartConfig,
    /// Places added to the built-in gazetteer.
    pub locations: Vec<LocationEntry>,
    pub decade_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: ChartConfig::default(),
            locations: Vec::new(),
            decade_count: DEFAULT_DECADE_COUNT,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Solar-calendar specification with this config's default modes.
    pub fn solar_spec(&self, datetime: impl Into<String>) -> BirthSpecification {
        BirthSpecification::solar(datetime).with_config(self.defaults)
    }

    /// Lunisolar specification with this config's default modes.
    pub fn lunisolar_spec(
        &self,
        datetime: impl Into<String>,
        leap_month: bool,
    ) -> BirthSpecification {
        BirthSpecification::lunisolar(datetime, leap_month).with_config(self.defaults)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            locations = config.locations.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.decade_count < 2 {
            return Err(ConfigError::Invalid(
                "decade_count must be at least 2".to_string(),
            ));
        }
        for loc in &self.locations {
            if loc.name.trim().is_empty() {
                return Err(ConfigError::Invalid("location name must not be empty".into()));
            }
            if !(-180.0..=180.0).contains(&loc.longitude) || !(-90.0..=90.0).contains(&loc.latitude)
            {
                return Err(ConfigError::Invalid(format!(
                    "location {} has out-of-range coordinates",
                    loc.name
                )));
            }
        }
        Ok(())
    }
}
