//! Location resolution: explicit coordinates, gazetteer lookup, or the
//! reference-meridian fallback.

use std::collections::BTreeMap;

use bazi_time::REFERENCE_LONGITUDE_DEG;
use serde::{Deserialize, Serialize};

use crate::birth::BirthPlace;
use crate::error::EngineError;
use crate::trace::{Stage, Tracer};

/// A named point, degrees east / north.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// How a longitude was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    Coordinates,
    Gazetteer,
    /// Name not found; the reference meridian was used.
    Fallback,
}

/// Resolved birth place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub name: Option<String>,
    pub longitude: f64,
    /// Unknown for the fallback.
    pub latitude: Option<f64>,
    pub source: LocationSource,
}

#[rustfmt::skip]
static BUILTIN_PLACES: [(&str, f64, f64); 37] = [
    ("北京", 116.41, 39.90), ("上海", 121.47, 31.23), ("天津", 117.20, 39.13),
    ("重庆", 106.55, 29.56), ("广州", 113.26, 23.13), ("深圳", 114.06, 22.54),
    ("杭州", 120.16, 30.27), ("南京", 118.80, 32.06), ("武汉", 114.31, 30.59),
    ("成都", 104.07, 30.57), ("西安", 108.94, 34.34), ("沈阳", 123.43, 41.80),
    ("哈尔滨", 126.53, 45.80), ("长春", 125.32, 43.82), ("济南", 117.00, 36.65),
    ("青岛", 120.38, 36.07), ("郑州", 113.63, 34.75), ("长沙", 112.94, 28.23),
    ("南昌", 115.86, 28.68), ("福州", 119.30, 26.08), ("厦门", 118.09, 24.48),
    ("合肥", 117.23, 31.82), ("太原", 112.55, 37.87), ("石家庄", 114.51, 38.04),
    ("呼和浩特", 111.75, 40.84), ("兰州", 103.83, 36.06), ("西宁", 101.78, 36.62),
    ("银川", 106.23, 38.49), ("乌鲁木齐", 87.62, 43.83), ("拉萨", 91.13, 29.65),
    ("昆明", 102.83, 24.88), ("贵阳", 106.63, 26.65), ("南宁", 108.37, 22.82),
    ("海口", 110.20, 20.04), ("台北", 121.56, 25.04), ("香港", 114.17, 22.32),
    ("澳门", 113.54, 22.20),
];

/// Name → (longitude, latitude) table.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: BTreeMap<String, (f64, f64)>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self {
            places: BUILTIN_PLACES
                .iter()
                .map(|&(name, lon, lat)| (name.to_string(), (lon, lat)))
                .collect(),
        }
    }
}

impl Gazetteer {
    /// Built-in cities extended (or overridden) by `extra`.
    pub fn with_entries(extra: &[LocationEntry]) -> Self {
        let mut g = Self::default();
        for e in extra {
            g.places
                .insert(e.name.clone(), (e.longitude, e.latitude));
        }
        g
    }

    pub fn lookup(&self, name: &str) -> Option<(f64, f64)> {
        self.places.get(name.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Resolve a birth place. Unknown names fall back to 120°E.
    pub fn resolve(
        &self,
        place: &BirthPlace,
        tracer: &mut Tracer,
    ) -> Result<ResolvedLocation, EngineError> {
        let resolved = match place {
            BirthPlace::Coordinates {
                longitude,
                latitude,
            } => {
                if !longitude.is_finite()
                    || !latitude.is_finite()
                    || longitude.abs() > 180.0
                    || latitude.abs() > 90.0
                {
                    return Err(EngineError::InvalidCoordinates {
                        longitude: *longitude,
                        latitude: *latitude,
                    });
                }
                ResolvedLocation {
                    name: None,
                    longitude: *longitude,
                    latitude: Some(*latitude),
                    source: LocationSource::Coordinates,
                }
            }
            BirthPlace::Named(name) => match self.lookup(name) {
                Some((longitude, latitude)) => ResolvedLocation {
                    name: Some(name.clone()),
                    longitude,
                    latitude: Some(latitude),
                    source: LocationSource::Gazetteer,
                },
                None => {
                    tracing::warn!(
                        place = name.as_str(),
                        "unknown location, using reference meridian"
                    );
                    tracer.record_value(
                        Stage::Location,
                        format!("unknown place {name:?}, falling back to {REFERENCE_LONGITUDE_DEG}°E"),
                        REFERENCE_LONGITUDE_DEG,
                    );
                    ResolvedLocation {
                        name: Some(name.clone()),
                        longitude: REFERENCE_LONGITUDE_DEG,
                        latitude: None,
                        source: LocationSource::Fallback,
                    }
                }
            },
        };
        if resolved.source != LocationSource::Fallback {
            tracer.record_value(
                Stage::Location,
                format!("longitude {:.2}°E", resolved.longitude),
                resolved.longitude,
            );
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_city() {
        let mut t = Tracer::new();
        let r = Gazetteer::default()
            .resolve(&BirthPlace::Named("上海".into()), &mut t)
            .unwrap();
        assert_eq!(r.source, LocationSource::Gazetteer);
        assert!((r.longitude - 121.47).abs() < 1e-9);
    }

    #[test]
    fn unknown_name_falls_back_with_trace() {
        let mut t = Tracer::new();
        let r = Gazetteer::default()
            .resolve(&BirthPlace::Named("Atlantis".into()), &mut t)
            .unwrap();
        assert_eq!(r.source, LocationSource::Fallback);
        assert_eq!(r.longitude, 120.0);
        assert_eq!(r.latitude, None);
        assert_eq!(t.steps()[0].stage, Stage::Location);
    }

    #[test]
    fn extra_entries_override() {
        let g = Gazetteer::with_entries(&[LocationEntry {
            name: "北京".into(),
            longitude: 116.0,
            latitude: 40.0,
        }]);
        assert_eq!(g.lookup("北京"), Some((116.0, 40.0)));
        assert_eq!(g.len(), 37);
    }

    #[test]
    fn rejects_bad_coordinates() {
        let mut t = Tracer::new();
        let r = Gazetteer::default().resolve(
            &BirthPlace::Coordinates {
                longitude: 200.0,
                latitude: 0.0,
            },
            &mut t,
        );
        assert!(matches!(r, Err(EngineError::InvalidCoordinates { .. })));
    }
}
