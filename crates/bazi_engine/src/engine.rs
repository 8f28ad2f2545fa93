//! The staged arrangement pipeline.

use std::ops::RangeInclusive;

use bazi_almanac::{Almanac, CalendarPrimitive};
use chrono::Local;

use crate::auxiliary::auxiliary_palaces;
use crate::birth::BirthSpecification;
use crate::chart::ChartResult;
use crate::command::month_command;
use crate::config::EngineConfig;
use crate::energy::energy_profile;
use crate::error::EngineError;
use crate::fortune::{expand_timeline, fortune_timeline};
use crate::geju::classify_geju;
use crate::interactions::{detect_interactions, validate_transformations};
use crate::location::Gazetteer;
use crate::normalize::normalize;
use crate::pillars::extract_pillars;
use crate::stars::detect_stars;
use crate::strength::analyze_strength;
use crate::trace::{Stage, Tracer};

/// Chart engine over a calendar primitive.
///
/// Holds only read-only state, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Engine<C: CalendarPrimitive = Almanac> {
    primitive: C,
    config: EngineConfig,
    gazetteer: Gazetteer,
}

impl Engine<Almanac> {
    /// Engine over the built-in almanac.
    pub fn with_almanac(config: EngineConfig) -> Self {
        Self::new(Almanac::new(), config)
    }
}

impl Default for Engine<Almanac> {
    fn default() -> Self {
        Self::with_almanac(EngineConfig::default())
    }
}

impl<C: CalendarPrimitive> Engine<C> {
    pub fn new(primitive: C, config: EngineConfig) -> Self {
        let gazetteer = Gazetteer::with_entries(&config.locations);
        Self {
            primitive,
            config,
            gazetteer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn primitive(&self) -> &C {
        &self.primitive
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Arrange a chart, optionally expanding a year range of the fortune timeline.
    pub fn arrange(
        &self,
        spec: &BirthSpecification,
        expand_years: Option<RangeInclusive<i32>>,
    ) -> Result<ChartResult, EngineError> {
        let mut tracer = Tracer::new();
        tracer.record(
            Stage::Preprocess,
            format!(
                "arranging {} born {}",
                spec.name.as_deref().unwrap_or("anonymous"),
                spec.datetime
            ),
        );

        let correction = normalize(&self.primitive, spec, &self.gazetteer, &mut tracer)?;
        let instant = correction.instant;
        let extraction = extract_pillars(&self.primitive, instant, &spec.config, &mut tracer)?;
        let pillars = extraction.pillars;

        let mut fortune = fortune_timeline(
            &self.primitive,
            instant,
            &pillars,
            spec.gender,
            self.config.decade_count,
            &mut tracer,
        )?;
        if let Some(range) = expand_years {
            expand_timeline(&self.primitive, &mut fortune, range, &mut tracer)?;
        }
        let auxiliary = auxiliary_palaces(&pillars, &mut tracer);

        let month_command = month_command(instant, &extraction.terms, &pillars, &mut tracer);
        let energy = energy_profile(&pillars, &mut tracer);
        let mut interactions = detect_interactions(&pillars, &mut tracer);
        validate_transformations(&mut interactions, &pillars, &mut tracer);
        let geju = classify_geju(&pillars, &energy, &interactions, &mut tracer);
        let strength = analyze_strength(&pillars, &energy, &geju, &mut tracer);
        let stars = detect_stars(&pillars, &mut tracer);

        tracing::info!(
            pillars = %pillars,
            geju = geju.name.as_str(),
            strength = strength.level.name(),
            steps = tracer.len(),
            "chart arranged"
        );

        Ok(ChartResult {
            processed_at: Local::now(),
            request: spec.clone(),
            correction,
            lunar: extraction.lunar,
            pillars,
            terms: extraction.terms,
            month_command,
            energy,
            interactions,
            geju,
            strength,
            stars,
            fortune,
            auxiliary,
            trace: tracer.into_steps(),
        })
    }

    /// Expand a year range of an arranged chart in place.
    ///
    /// Re-expanding a range leaves the timeline unchanged; only trace steps are added.
    pub fn expand(
        &self,
        chart: &mut ChartResult,
        range: RangeInclusive<i32>,
    ) -> Result<usize, EngineError> {
        let mut tracer = Tracer::new();
        let expanded = expand_timeline(&self.primitive, &mut chart.fortune, range, &mut tracer)?;
        chart.trace.extend(tracer.into_steps());
        Ok(expanded)
    }
}
