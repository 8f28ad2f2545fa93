//! Per-invocation audit log of derivation steps.
//!
//! A [`Tracer`] is created by each `arrange` call, threaded by `&mut` through
//! the stages, and moved into the result. Every step is also emitted as a
//! `tracing` debug event.

use serde::Serialize;

/// Pipeline stage a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Preprocess,
    Location,
    Pillars,
    Fortune,
    Auxiliary,
    MonthCommand,
    Energy,
    Interactions,
    Geju,
    Strength,
    Stars,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Preprocess => "预处理",
            Self::Location => "地点解析",
            Self::Pillars => "核心命盘",
            Self::Fortune => "动态运程",
            Self::Auxiliary => "辅助命盘",
            Self::MonthCommand => "月令分司",
            Self::Energy => "五行评分",
            Self::Interactions => "干支作用",
            Self::Geju => "格局判定",
            Self::Strength => "强弱判定",
            Self::Stars => "神煞检测",
        }
    }
}

/// One recorded derivation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub stage: Stage,
    pub description: String,
    /// Numeric quantity the step changed or measured, if any.
    pub value: Option<f64>,
}

/// Append-only step log.
#[derive(Debug, Default)]
pub struct Tracer {
    steps: Vec<TraceStep>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, description: impl Into<String>) {
        self.push(stage, description.into(), None);
    }

    pub fn record_value(&mut self, stage: Stage, description: impl Into<String>, value: f64) {
        self.push(stage, description.into(), Some(value));
    }

    fn push(&mut self, stage: Stage, description: String, value: Option<f64>) {
        tracing::debug!(stage = stage.name(), value, "{description}");
        self.steps.push(TraceStep {
            stage,
            description,
            value,
        });
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_keep_emission_order() {
        let mut t = Tracer::new();
        t.record(Stage::Preprocess, "first");
        t.record_value(Stage::Energy, "second", 1.5);
        let steps = t.into_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].description, "first");
        assert_eq!(steps[0].value, None);
        assert_eq!(steps[1].stage, Stage::Energy);
        assert_eq!(steps[1].value, Some(1.5));
    }

    #[test]
    fn tracers_are_independent() {
        let mut a = Tracer::new();
        let b = Tracer::new();
        a.record(Stage::Stars, "only in a");
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
