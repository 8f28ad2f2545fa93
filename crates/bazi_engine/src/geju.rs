//! Pattern (格局) classification.
//!
//! First match wins: pervasive (day element above 70% of the total), then
//! subordinate (day element below 15% with no resource stem), then the
//! ordinary eight patterns taken from month-branch stems standing in the
//! heavenly stems. Ordinary names may be relabeled to a compound pattern.

use bazi_base::{Element, TenGod, TenGodFamily};
use serde::Serialize;

use crate::energy::EnergyProfile;
use crate::interactions::Interaction;
use crate::pillars::{FourPillars, Position};
use crate::trace::{Stage, Tracer};

pub const PERVASIVE_SHARE: f64 = 0.70;
pub const SUBORDINATE_SHARE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GejuCategory {
    /// 正八格
    OrdinaryEight,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GejuStatus {
    /// 成格
    Established,
    /// Named from a month role the rules do not cover; needs review.
    Provisional,
}

/// Compound patterns formed with a resource stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundPattern {
    /// 伤官佩印
    ExpressionCarriesResource,
    /// 杀印相生
    DominanceGeneratesResource,
    /// 官印相生
    AuthorityGeneratesResource,
}

impl CompoundPattern {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExpressionCarriesResource => "伤官佩印",
            Self::DominanceGeneratesResource => "杀印相生",
            Self::AuthorityGeneratesResource => "官印相生",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GejuClassification {
    pub name: String,
    pub category: GejuCategory,
    pub status: GejuStatus,
    pub compound: Option<CompoundPattern>,
    /// Stem or month role the pattern was named from.
    pub role: Option<TenGod>,
    pub detail: String,
}

impl GejuClassification {
    /// Whether the pattern leans on a resource stem for protection.
    pub fn carries_resource(&self) -> bool {
        self.compound.is_some()
    }
}

/// Pervasive pattern of a day element.
pub const fn pervasive_name(element: Element) -> &'static str {
    match element {
        Element::Wood => "曲直格",
        Element::Fire => "炎上格",
        Element::Earth => "稼穑格",
        Element::Metal => "从革格",
        Element::Water => "润下格",
    }
}

/// Subordinate pattern named after the dominant family, if it qualifies.
pub const fn subordinate_name(family: TenGodFamily) -> Option<&'static str> {
    match family {
        TenGodFamily::Wealth => Some("从财格"),
        TenGodFamily::Authority => Some("从杀格"),
        TenGodFamily::Output => Some("从儿格"),
        TenGodFamily::Peer | TenGodFamily::Resource => None,
    }
}

fn special(name: &str, detail: String) -> GejuClassification {
    GejuClassification {
        name: name.to_string(),
        category: GejuCategory::Special,
        status: GejuStatus::Established,
        compound: None,
        role: None,
        detail,
    }
}

pub fn classify_geju(
    pillars: &FourPillars,
    energy: &EnergyProfile,
    interactions: &[Interaction],
    tracer: &mut Tracer,
) -> GejuClassification {
    let day_stem = pillars.day_stem();
    let day_element = pillars.day_element();
    let share = energy.share(day_element);
    let realized = interactions.iter().filter(|i| i.transformed).count();
    tracer.record_value(
        Stage::Geju,
        format!(
            "day element {} holds {:.1}% of the total, {realized} realized transformation(s)",
            day_element.name(),
            share * 100.0
        ),
        share,
    );

    if share > PERVASIVE_SHARE {
        let name = pervasive_name(day_element);
        tracer.record(Stage::Geju, format!("pervasive pattern {name}"));
        return special(name, "日主气势极盛，五行专旺".to_string());
    }

    let stem_roles: Vec<(Position, TenGod)> = pillars
        .outer_stems()
        .iter()
        .map(|&(p, s)| (p, TenGod::of(day_stem, s)))
        .collect();
    let has_resource = stem_roles.iter().any(|(_, g)| g.is_resource());

    if share < SUBORDINATE_SHARE && !has_resource {
        let top = energy.strongest();
        let family = TenGod::of(day_stem, bazi_base::Stem::yang_of(top)).family();
        if let Some(name) = subordinate_name(family) {
            tracer.record(
                Stage::Geju,
                format!("day stem rootless, follows {} ({})", top.name(), family.name()),
            );
            return special(name, format!("日主无根无助，弃命从{}", family.name()));
        }
    }

    // Ordinary: first outer stem rooted in the month branch with a non-peer role.
    let month_hidden: Vec<_> = pillars.month.hidden_stems().collect();
    let rooted = pillars
        .outer_stems()
        .into_iter()
        .map(|(p, s)| (p, s, TenGod::of(day_stem, s)))
        .find(|(_, s, g)| month_hidden.contains(s) && g.family() != TenGodFamily::Peer);

    let (mut name, role, status) = match rooted {
        Some((pos, stem, god)) => {
            tracer.record(
                Stage::Geju,
                format!("{pos} stem {stem} is rooted in the month branch as {}", god.name()),
            );
            (god.name().to_string(), god, GejuStatus::Established)
        }
        None => {
            let god = TenGod::of(day_stem, pillars.month_branch().main_stem());
            match god {
                TenGod::Companion => ("建禄格".to_string(), god, GejuStatus::Established),
                TenGod::RobWealth => ("月刃格".to_string(), god, GejuStatus::Established),
                other => {
                    tracer.record(
                        Stage::Geju,
                        format!(
                            "no stem rooted in the month branch; month role {} outside peer fallback",
                            other.name()
                        ),
                    );
                    (other.name().to_string(), other, GejuStatus::Provisional)
                }
            }
        }
    };

    let compound = if role == TenGod::HurtingOfficer
        || stem_roles.iter().any(|(_, g)| *g == TenGod::HurtingOfficer)
    {
        has_resource.then_some(CompoundPattern::ExpressionCarriesResource)
    } else if has_resource && role == TenGod::SevenKillings {
        Some(CompoundPattern::DominanceGeneratesResource)
    } else if has_resource && role == TenGod::DirectOfficer {
        Some(CompoundPattern::AuthorityGeneratesResource)
    } else {
        None
    };
    if let Some(c) = compound {
        tracer.record(Stage::Geju, format!("{name} with resource stem relabeled {}", c.name()));
        name = c.name().to_string();
    } else if !name.ends_with('格') {
        name.push('格');
    }

    GejuClassification {
        name,
        category: GejuCategory::OrdinaryEight,
        status,
        compound,
        role: Some(role),
        detail: "标准正八格取法".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::energy_profile;
    use crate::pillars::tests::pillars_of;

    fn classify(names: [&str; 4]) -> GejuClassification {
        let p = pillars_of(names);
        let mut t = Tracer::new();
        let e = energy_profile(&p, &mut t);
        classify_geju(&p, &e, &[], &mut t)
    }

    #[test]
    fn pervasive_wood() {
        let p = pillars_of(["癸卯", "乙卯", "甲寅", "乙亥"]);
        let e = energy_profile(&p, &mut Tracer::new());
        assert!(e.share(Element::Wood) > PERVASIVE_SHARE);
        let g = classify(["癸卯", "乙卯", "甲寅", "乙亥"]);
        assert_eq!(g.name, "曲直格");
        assert_eq!(g.category, GejuCategory::Special);
    }

    #[test]
    fn expression_with_resource_relabels() {
        // 丙 day, 子 month hides only 癸 and no stem shows it; 伤官 (己)
        // and 偏印 (甲) both stand, so the fallback relabels.
        let g = classify(["己巳", "丙子", "丙寅", "甲午"]);
        assert_eq!(g.name, "伤官佩印");
        assert_eq!(g.compound, Some(CompoundPattern::ExpressionCarriesResource));
        assert_eq!(g.category, GejuCategory::OrdinaryEight);
        assert_eq!(g.status, GejuStatus::Provisional);
    }

    #[test]
    fn rooted_compound_stays_established() {
        // 甲 day in 申 month: 庚 (七杀) is rooted, so the relabeled pattern keeps its status.
        let g = classify(["庚午", "壬申", "甲子", "甲子"]);
        assert_eq!(g.compound, Some(CompoundPattern::DominanceGeneratesResource));
        assert_eq!(g.status, GejuStatus::Established);
    }

    #[test]
    fn rootless_day_follows_wealth() {
        // 甲 day among 戊己 earth in 未 month, no resource stem: wood holds
        // 42 of 498.85 scaled points while earth dominates.
        let p = pillars_of(["戊戌", "己未", "甲戌", "戊辰"]);
        let e = energy_profile(&p, &mut Tracer::new());
        assert!(e.share(Element::Wood) < SUBORDINATE_SHARE);
        assert_eq!(e.strongest(), Element::Earth);
        let g = classify(["戊戌", "己未", "甲戌", "戊辰"]);
        assert_eq!(g.name, "从财格");
        assert_eq!(g.category, GejuCategory::Special);
        assert_eq!(g.status, GejuStatus::Established);
        assert_eq!(g.role, None);
        assert_eq!(g.detail, "日主无根无助，弃命从财星");
    }

    #[test]
    fn resource_stem_blocks_following() {
        // Same earth chart with 壬 (偏印) in the hour: no subordinate pattern.
        let g = classify(["戊戌", "己未", "甲戌", "壬申"]);
        assert_eq!(g.category, GejuCategory::OrdinaryEight);
    }

    #[test]
    fn subordinate_names_by_family() {
        assert_eq!(subordinate_name(TenGodFamily::Wealth), Some("从财格"));
        assert_eq!(subordinate_name(TenGodFamily::Authority), Some("从杀格"));
        assert_eq!(subordinate_name(TenGodFamily::Output), Some("从儿格"));
        assert_eq!(subordinate_name(TenGodFamily::Peer), None);
        assert_eq!(subordinate_name(TenGodFamily::Resource), None);
    }

    #[test]
    fn established_emolument_fallback() {
        // 甲 day in 寅 month; stems 庚 壬 庚 are not hidden in 寅.
        let g = classify(["庚申", "壬寅", "甲子", "庚午"]);
        assert_eq!(g.name, "建禄格");
        assert_eq!(g.status, GejuStatus::Established);
    }

    #[test]
    fn dominance_with_resource() {
        // 甲 day, 申 month hides 庚 壬 戊; 庚 (七杀) stands in the year, 壬 (偏印) in the month.
        let g = classify(["庚午", "壬申", "甲子", "甲子"]);
        assert_eq!(g.role, Some(TenGod::SevenKillings));
        assert_eq!(g.name, "杀印相生");
    }

    #[test]
    fn provisional_month_role() {
        // 甲 day in 子 month (癸 only); stems 丙 庚 甲 are not hidden in 子,
        // main 癸 is 正印, which the peer fallback does not cover.
        let g = classify(["丙寅", "庚子", "甲寅", "甲子"]);
        assert_eq!(g.status, GejuStatus::Provisional);
        assert_eq!(g.role, Some(TenGod::DirectResource));
        assert_eq!(g.name, "正印格");
        assert!(!g.carries_resource());
    }
}
