//! Five-element energy scores.
//!
//! Raw score per element: 10 × positional weight for each pillar stem, plus
//! 10 × branch weight × root weight for each hidden stem. The raw score is
//! then scaled by the element's seasonal factor in the governing month.

use bazi_base::{
    ALL_ELEMENTS, Branch, Element, LifeStage, SeasonalStatus, Stem, life_stage, seasonal_status,
};
use serde::Serialize;

use crate::pillars::{FourPillars, Position};
use crate::trace::{Stage, Tracer};

const BASE_POINTS: f64 = 10.0;

/// Weight of a pillar's stem.
pub const fn stem_weight(position: Position) -> f64 {
    match position {
        Position::Year => 1.0,
        Position::Month => 1.2,
        Position::Day => 0.5,
        Position::Hour => 1.0,
    }
}

/// Weight of a pillar's branch, applied to its hidden stems.
pub const fn branch_weight(position: Position) -> f64 {
    match position {
        Position::Year => 1.0,
        Position::Month => 4.0,
        Position::Day => 1.5,
        Position::Hour => 1.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementScore {
    pub element: Element,
    pub raw: f64,
    pub status: SeasonalStatus,
    pub factor: f64,
    /// `raw × factor`, rounded to 2 decimals.
    pub score: f64,
    /// Life stage of the element's yang stem at the month branch.
    pub life_stage: LifeStage,
}

/// Scores of all five elements in element order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyProfile {
    pub month_branch: Branch,
    pub scores: [ElementScore; 5],
}

impl EnergyProfile {
    pub fn get(&self, element: Element) -> &ElementScore {
        &self.scores[element.index() as usize]
    }

    pub fn score(&self, element: Element) -> f64 {
        self.get(element).score
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().map(|s| s.score).sum()
    }

    /// Share of `element` in the total; 0 for an empty profile.
    pub fn share(&self, element: Element) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.score(element) / total
        } else {
            0.0
        }
    }

    /// Highest-scoring element; ties go to the earlier element.
    pub fn strongest(&self) -> Element {
        let mut best = &self.scores[0];
        for s in &self.scores[1..] {
            if s.score > best.score {
                best = s;
            }
        }
        best.element
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Raw (unscaled) element scores.
pub fn raw_scores(pillars: &FourPillars) -> [f64; 5] {
    let mut raw = [0.0; 5];
    for p in pillars.all() {
        raw[p.stem().element().index() as usize] += BASE_POINTS * stem_weight(p.position);
        for h in &p.hidden {
            raw[h.stem.element().index() as usize] +=
                BASE_POINTS * branch_weight(p.position) * h.depth.root_weight();
        }
    }
    raw
}

pub fn energy_profile(pillars: &FourPillars, tracer: &mut Tracer) -> EnergyProfile {
    let month_branch = pillars.month_branch();
    let raw = raw_scores(pillars);
    let scores = ALL_ELEMENTS.map(|element| {
        let status = seasonal_status(month_branch, element);
        let factor = status.factor();
        let r = raw[element.index() as usize];
        ElementScore {
            element,
            raw: r,
            status,
            factor,
            score: round2(r * factor),
            life_stage: life_stage(Stem::yang_of(element), month_branch),
        }
    });
    let profile = EnergyProfile {
        month_branch,
        scores,
    };
    let day = profile.get(pillars.day_element());
    tracer.record_value(
        Stage::Energy,
        format!(
            "day element {} is {} in {} month ({}), seasonal factor {}",
            day.element.name(),
            day.status.name(),
            month_branch,
            day.life_stage.name(),
            day.factor
        ),
        day.factor,
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::tests::pillars_of;

    #[test]
    fn raw_scores_of_1990_chart() {
        // 己巳 丙子 丙寅 甲午
        let p = pillars_of(["己巳", "丙子", "丙寅", "甲午"]);
        let raw = raw_scores(&p);
        // Wood: 甲 stem 10, plus 甲 as main stem of the day branch 寅 (10×1.5×3).
        assert!((raw[Element::Wood.index() as usize] - 55.0).abs() < 1e-9);
        // Water: 癸 in 子 (month, 4×3) = 120.
        assert!((raw[Element::Water.index() as usize] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn seasonal_statuses_form_a_permutation() {
        let p = pillars_of(["己巳", "丙子", "丙寅", "甲午"]);
        let profile = energy_profile(&p, &mut Tracer::new());
        let mut statuses: Vec<_> = profile.scores.iter().map(|s| s.status).collect();
        statuses.sort();
        statuses.dedup();
        assert_eq!(statuses.len(), 5);
        assert_eq!(profile.get(Element::Water).status, SeasonalStatus::Thriving);
        assert_eq!(profile.get(Element::Water).score, 156.0);
    }

    #[test]
    fn strongest_and_share() {
        let p = pillars_of(["己巳", "丙子", "丙寅", "甲午"]);
        let profile = energy_profile(&p, &mut Tracer::new());
        assert_eq!(profile.strongest(), Element::Water);
        let sum: f64 = ALL_ELEMENTS.iter().map(|&e| profile.share(e)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
