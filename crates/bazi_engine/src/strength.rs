//! Day-stem strength and the four functional elements.

use bazi_base::{Element, SeasonalStatus};
use serde::Serialize;

use crate::energy::{EnergyProfile, round2};
use crate::geju::GejuClassification;
use crate::pillars::FourPillars;
use crate::trace::{Stage, Tracer};

pub const EXTREMELY_STRONG_RATIO: f64 = 0.72;
pub const EXTREMELY_WEAK_RATIO: f64 = 0.28;
pub const WEAK_RATIO: f64 = 0.44;
/// Output above this fraction of the support score drains a nominally strong day stem.
pub const DRAIN_FRACTION: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    ExtremelyWeak,
    Weak,
    Balanced,
    Strong,
    ExtremelyStrong,
}

impl StrengthLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExtremelyWeak => "极弱",
            Self::Weak => "偏弱",
            Self::Balanced => "中和",
            Self::Strong => "偏强",
            Self::ExtremelyStrong => "极强",
        }
    }

    pub const fn is_strong(self) -> bool {
        matches!(self, Self::Strong | Self::ExtremelyStrong)
    }
}

/// How the favorable element was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLogic {
    /// 扶抑平衡
    SupportSuppress,
    /// 病药护格
    PatternProtection,
}

impl RoleLogic {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SupportSuppress => "扶抑平衡",
            Self::PatternProtection => "病药护格",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthVerdict {
    pub level: StrengthLevel,
    /// (day element + its resource) / total, in [0, 1].
    pub support_ratio: f64,
    /// `support_ratio` in percent, rounded to 2 decimals.
    pub support_percent: f64,
    /// Threshold above which the ratio counts as strong.
    pub threshold: f64,
    /// 用神
    pub favorable: Element,
    /// 喜神
    pub supportive: Element,
    /// 忌神
    pub unfavorable: Element,
    /// 仇神
    pub hostile: Element,
    pub logic: RoleLogic,
    /// True when heavy output downgraded the level to weak.
    pub drain_corrected: bool,
}

/// Strong/weak boundary for the day element's seasonal status.
pub const fn strong_threshold(status: SeasonalStatus) -> f64 {
    match status {
        SeasonalStatus::Thriving | SeasonalStatus::Supported => 0.46,
        SeasonalStatus::Trapped | SeasonalStatus::Dead => 0.55,
        SeasonalStatus::Resting => 0.50,
    }
}

/// Band a support ratio.
pub fn level_for(ratio: f64, threshold: f64) -> StrengthLevel {
    if ratio > EXTREMELY_STRONG_RATIO {
        StrengthLevel::ExtremelyStrong
    } else if ratio > threshold {
        StrengthLevel::Strong
    } else if ratio < EXTREMELY_WEAK_RATIO {
        StrengthLevel::ExtremelyWeak
    } else if ratio < WEAK_RATIO {
        StrengthLevel::Weak
    } else {
        StrengthLevel::Balanced
    }
}

pub fn analyze_strength(
    pillars: &FourPillars,
    energy: &EnergyProfile,
    geju: &GejuClassification,
    tracer: &mut Tracer,
) -> StrengthVerdict {
    let day = pillars.day_element();
    let resource = day.generated_by();
    let output = day.generates();
    let wealth = day.controls();
    let authority = day.controlled_by();

    let support = energy.score(day) + energy.score(resource);
    let total = energy.total();
    let ratio = if total > 0.0 { support / total } else { 0.0 };
    let status = energy.get(day).status;
    let threshold = strong_threshold(status);
    let mut level = level_for(ratio, threshold);

    let drain_corrected = energy.score(output) > support * DRAIN_FRACTION
        && matches!(level, StrengthLevel::Balanced | StrengthLevel::Strong);
    if drain_corrected {
        tracer.record(
            Stage::Strength,
            format!(
                "output element {} drains the day stem, level lowered from {} to {}",
                output.name(),
                level.name(),
                StrengthLevel::Weak.name()
            ),
        );
        level = StrengthLevel::Weak;
    }
    tracer.record_value(
        Stage::Strength,
        format!(
            "support ratio {:.1}%, day element {}, level {}",
            ratio * 100.0,
            status.name(),
            level.name()
        ),
        ratio,
    );

    let (mut favorable, supportive, unfavorable, hostile) = if level.is_strong() {
        (authority, wealth, resource, day)
    } else {
        (resource, day, authority, wealth)
    };

    let logic = if geju.carries_resource() {
        if favorable != resource {
            tracer.record(
                Stage::Strength,
                format!("{} protects the pattern, favorable set to {}", geju.name, resource.name()),
            );
        }
        favorable = resource;
        RoleLogic::PatternProtection
    } else {
        RoleLogic::SupportSuppress
    };

    StrengthVerdict {
        level,
        support_ratio: ratio,
        support_percent: round2(ratio * 100.0),
        threshold,
        favorable,
        supportive,
        unfavorable,
        hostile,
        logic,
        drain_corrected,
    }
}
