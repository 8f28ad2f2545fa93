//! Twelve life stages (十二长生) of a stem across the branches.
//!
//! Each stem is born (长生) at a fixed branch; yang stems then advance through
//! the stages going forward along the branches, yin stems going backward.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::stem::Stem;

/// The twelve stages in life-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifeStage {
    /// 长生
    Nascent,
    /// 沐浴
    Bathing,
    /// 冠带
    Capping,
    /// 临官
    Official,
    /// 帝旺
    Peak,
    /// 衰
    Declining,
    /// 病
    Ailing,
    /// 死
    Dead,
    /// 墓
    Entombed,
    /// 绝
    Extinguished,
    /// 胎
    Embryonic,
    /// 养
    Nurtured,
}

/// All 12 stages in order (0 = Nascent).
pub const ALL_LIFE_STAGES: [LifeStage; 12] = [
    LifeStage::Nascent,
    LifeStage::Bathing,
    LifeStage::Capping,
    LifeStage::Official,
    LifeStage::Peak,
    LifeStage::Declining,
    LifeStage::Ailing,
    LifeStage::Dead,
    LifeStage::Entombed,
    LifeStage::Extinguished,
    LifeStage::Embryonic,
    LifeStage::Nurtured,
];

impl LifeStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nascent => "长生",
            Self::Bathing => "沐浴",
            Self::Capping => "冠带",
            Self::Official => "临官",
            Self::Peak => "帝旺",
            Self::Declining => "衰",
            Self::Ailing => "病",
            Self::Dead => "死",
            Self::Entombed => "墓",
            Self::Extinguished => "绝",
            Self::Embryonic => "胎",
            Self::Nurtured => "养",
        }
    }

    /// Stages from birth up to and including the peak.
    pub const fn is_rising(self) -> bool {
        matches!(
            self,
            Self::Nascent | Self::Bathing | Self::Capping | Self::Official | Self::Peak
        )
    }
}

/// Branch where a stem's cycle starts (长生).
pub const fn nascent_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Branch::Hai,
        Stem::Bing | Stem::Wu => Branch::Yin,
        Stem::Geng => Branch::Si,
        Stem::Ren => Branch::Shen,
        Stem::Yi => Branch::Wu,
        Stem::Ding | Stem::Ji => Branch::You,
        Stem::Xin => Branch::Zi,
        Stem::Gui => Branch::Mao,
    }
}

/// Life stage of `stem` at `branch`.
pub const fn life_stage(stem: Stem, branch: Branch) -> LifeStage {
    let start = nascent_branch(stem).index() as i64;
    let b = branch.index() as i64;
    let step = if stem.index() % 2 == 0 {
        b - start
    } else {
        start - b
    };
    ALL_LIFE_STAGES[step.rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jia_table() {
        assert_eq!(life_stage(Stem::Jia, Branch::Hai), LifeStage::Nascent);
        assert_eq!(life_stage(Stem::Jia, Branch::Mao), LifeStage::Peak);
        assert_eq!(life_stage(Stem::Jia, Branch::Wu), LifeStage::Dead);
        assert_eq!(life_stage(Stem::Jia, Branch::Xu), LifeStage::Nurtured);
    }

    #[test]
    fn yi_runs_backward() {
        assert_eq!(life_stage(Stem::Yi, Branch::Wu), LifeStage::Nascent);
        assert_eq!(life_stage(Stem::Yi, Branch::Si), LifeStage::Bathing);
        assert_eq!(life_stage(Stem::Yi, Branch::Yin), LifeStage::Peak);
        assert_eq!(life_stage(Stem::Yi, Branch::Wei), LifeStage::Nurtured);
    }

    #[test]
    fn xin_official_at_you() {
        assert_eq!(life_stage(Stem::Xin, Branch::You), LifeStage::Official);
        assert_eq!(life_stage(Stem::Xin, Branch::Shen), LifeStage::Peak);
    }

    #[test]
    fn gui_entombed_at_wei() {
        assert_eq!(life_stage(Stem::Gui, Branch::Wei), LifeStage::Entombed);
    }

    #[test]
    fn rising_stages() {
        let rising = ALL_LIFE_STAGES.iter().filter(|s| s.is_rising()).count();
        assert_eq!(rising, 5);
        assert!(!LifeStage::Declining.is_rising());
    }
}
