//! Stem combinations, branch clashes and repeated pillars, plus the
//! transformation check run once the full list is known.

use bazi_base::{Branch, Element, LifeStage, Stem, branches_clash, life_stage, stem_combination};
use serde::Serialize;

use crate::pillars::{ALL_POSITIONS, FourPillars, Position};
use crate::trace::{Stage, Tracer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// 合, stem combination.
    Combination,
    /// 冲, branch clash.
    Clash,
    /// 伏吟, identical pillars.
    Repetition,
}

impl InteractionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Combination => "合",
            Self::Clash => "冲",
            Self::Repetition => "伏吟",
        }
    }
}

/// Evidence gathered for a combination's transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransformationCheck {
    /// A stem of the resultant element stands among the four stems.
    pub leader_present: bool,
    /// Stage of the resultant element's yang stem at the month branch.
    pub month_stage: LifeStage,
    pub month_support: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub source: Position,
    pub target: Position,
    /// Resultant element of a combination.
    pub element: Option<Element>,
    /// Set by [`validate_transformations`].
    pub transformed: bool,
    pub check: Option<TransformationCheck>,
    pub description: String,
}

fn pairs() -> impl Iterator<Item = (Position, Position)> {
    ALL_POSITIONS
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| ALL_POSITIONS[i + 1..].iter().map(move |&b| (a, b)))
}

/// Collect every interaction among the four pillars, unvalidated.
pub fn detect_interactions(pillars: &FourPillars, tracer: &mut Tracer) -> Vec<Interaction> {
    let mut found = Vec::new();
    for (a, b) in pairs() {
        let (sa, sb) = (pillars.get(a).stem(), pillars.get(b).stem());
        if let Some(element) = stem_combination(sa, sb) {
            tracer.record(Stage::Interactions, format!("stem combination {a}{sa} + {b}{sb}"));
            found.push(Interaction {
                kind: InteractionKind::Combination,
                source: a,
                target: b,
                element: Some(element),
                transformed: false,
                check: None,
                description: format!("{sa}{sb}合化{}", element.name()),
            });
        }
    }
    for (a, b) in pairs() {
        let (ba, bb) = (pillars.get(a).branch(), pillars.get(b).branch());
        if branches_clash(ba, bb) {
            tracer.record(Stage::Interactions, format!("branch clash {a}{ba} vs {b}{bb}"));
            found.push(Interaction {
                kind: InteractionKind::Clash,
                source: a,
                target: b,
                element: None,
                transformed: false,
                check: None,
                description: format!("{ba}{bb}相冲"),
            });
        }
    }
    for (a, b) in pairs() {
        if pillars.get(a).ganzhi == pillars.get(b).ganzhi {
            found.push(Interaction {
                kind: InteractionKind::Repetition,
                source: a,
                target: b,
                element: None,
                transformed: false,
                check: None,
                description: format!("{a}与{b}伏吟"),
            });
        }
    }
    found
}

/// Evaluate the two transformation conditions for `element`.
pub fn transformation_check(
    element: Element,
    stems: &[Stem],
    month_branch: Branch,
) -> TransformationCheck {
    let month_stage = life_stage(Stem::yang_of(element), month_branch);
    TransformationCheck {
        leader_present: stems.iter().any(|s| s.element() == element),
        month_stage,
        month_support: month_stage.is_rising(),
    }
}

/// Mark each combination realized when both conditions hold.
pub fn validate_transformations(
    interactions: &mut [Interaction],
    pillars: &FourPillars,
    tracer: &mut Tracer,
) {
    let stems = pillars.all().map(|p| p.stem());
    let month_branch = pillars.month_branch();
    for inter in interactions
        .iter_mut()
        .filter(|i| i.kind == InteractionKind::Combination)
    {
        let Some(element) = inter.element else {
            continue;
        };
        let check = transformation_check(element, &stems, month_branch);
        inter.transformed = check.leader_present && check.month_support;
        inter.check = Some(check);
        if inter.transformed {
            tracer.record(
                Stage::Interactions,
                format!(
                    "{} transforms: leader present, month supports ({})",
                    inter.description,
                    check.month_stage.name()
                ),
            );
        } else {
            let reason = if !check.leader_present {
                "no leader stem".to_string()
            } else {
                format!("month does not support ({})", check.month_stage.name())
            };
            tracer.record(
                Stage::Interactions,
                format!("{} combines without transforming: {reason}", inter.description),
            );
        }
    }
}
