//! The aggregate returned by [`Engine::arrange`](crate::Engine::arrange).

use bazi_almanac::{LunarDate, TermContext};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::auxiliary::AuxiliaryPalaces;
use crate::birth::BirthSpecification;
use crate::command::MonthCommand;
use crate::energy::EnergyProfile;
use crate::fortune_types::FortuneTimeline;
use crate::geju::GejuClassification;
use crate::interactions::Interaction;
use crate::normalize::CorrectedInstant;
use crate::pillars::FourPillars;
use crate::stars::Star;
use crate::strength::StrengthVerdict;
use crate::trace::TraceStep;

/// Every stage output of one chart, plus the ordered audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    /// Wall clock at which the chart was arranged; the only non-deterministic field.
    pub processed_at: DateTime<Local>,
    pub request: BirthSpecification,
    pub correction: CorrectedInstant,
    /// Lunisolar date of the corrected instant.
    pub lunar: LunarDate,
    pub pillars: FourPillars,
    pub terms: TermContext,
    pub month_command: MonthCommand,
    pub energy: EnergyProfile,
    pub interactions: Vec<Interaction>,
    pub geju: GejuClassification,
    pub strength: StrengthVerdict,
    pub stars: Vec<Star>,
    pub fortune: FortuneTimeline,
    pub auxiliary: AuxiliaryPalaces,
    pub trace: Vec<TraceStep>,
}

impl ChartResult {
    /// True when both charts agree on everything but the audit fields.
    pub fn same_chart(&self, other: &Self) -> bool {
        self.request == other.request
            && self.correction == other.correction
            && self.lunar == other.lunar
            && self.pillars == other.pillars
            && self.terms == other.terms
            && self.month_command == other.month_command
            && self.energy == other.energy
            && self.interactions == other.interactions
            && self.geju == other.geju
            && self.strength == other.strength
            && self.stars == other.stars
            && self.fortune == other.fortune
            && self.auxiliary == other.auxiliary
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
