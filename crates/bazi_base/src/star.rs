//! Star (神煞) catalogues.
//!
//! Each function is one lookup table keyed by the pillar component the star
//! is read from. Which chart positions are matched against the result is
//! decided by the detector in the engine.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::ganzhi::GanZhi;
use crate::stem::Stem;

/// Markers in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarKind {
    /// 天乙贵人
    HeavenlyNoble,
    /// 月德贵人
    MonthVirtue,
    /// 天德贵人
    HeavenVirtue,
    /// 驿马
    TravelHorse,
    /// 咸池
    Romance,
    /// 截路空亡
    BlockedRoadVoid,
}

impl StarKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HeavenlyNoble => "天乙贵人",
            Self::MonthVirtue => "月德贵人",
            Self::HeavenVirtue => "天德贵人",
            Self::TravelHorse => "驿马",
            Self::Romance => "咸池",
            Self::BlockedRoadVoid => "截路空亡",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::HeavenlyNoble => "玉堂金马，逢凶化吉",
            Self::MonthVirtue => "阴德护佑，灾难不侵",
            Self::HeavenVirtue => "上天之德，化险为夷",
            Self::TravelHorse => "主迁徙变动",
            Self::Romance => "一名桃花，主性情风流",
            Self::BlockedRoadVoid => "行路受阻，晚年寥落",
        }
    }

    pub const fn is_auspicious(self) -> bool {
        matches!(
            self,
            Self::HeavenlyNoble | Self::MonthVirtue | Self::HeavenVirtue
        )
    }
}

/// 天乙: branches that carry the noble for a day stem.
pub const fn heavenly_noble(day_stem: Stem) -> [Branch; 2] {
    match day_stem {
        Stem::Jia | Stem::Wu | Stem::Geng => [Branch::Chou, Branch::Wei],
        Stem::Yi | Stem::Ji => [Branch::Zi, Branch::Shen],
        Stem::Bing | Stem::Ding => [Branch::Hai, Branch::You],
        Stem::Ren | Stem::Gui => [Branch::Si, Branch::Mao],
        Stem::Xin => [Branch::Wu, Branch::Yin],
    }
}

/// 月德: stem marked by the month branch's trine.
pub const fn month_virtue(month_branch: Branch) -> Stem {
    match month_branch {
        Branch::Yin | Branch::Wu | Branch::Xu => Stem::Bing,
        Branch::Shen | Branch::Zi | Branch::Chen => Stem::Ren,
        Branch::Hai | Branch::Mao | Branch::Wei => Stem::Jia,
        Branch::Si | Branch::You | Branch::Chou => Stem::Geng,
    }
}

/// Target of 天德: a stem in some months, a branch in others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtueTarget {
    Stem(Stem),
    Branch(Branch),
}

/// 天德 by month branch.
pub const fn heaven_virtue(month_branch: Branch) -> VirtueTarget {
    match month_branch {
        Branch::Yin => VirtueTarget::Stem(Stem::Ding),
        Branch::Mao => VirtueTarget::Branch(Branch::Shen),
        Branch::Chen => VirtueTarget::Stem(Stem::Ren),
        Branch::Si => VirtueTarget::Stem(Stem::Xin),
        Branch::Wu => VirtueTarget::Branch(Branch::Hai),
        Branch::Wei => VirtueTarget::Stem(Stem::Jia),
        Branch::Shen => VirtueTarget::Stem(Stem::Gui),
        Branch::You => VirtueTarget::Branch(Branch::Yin),
        Branch::Xu => VirtueTarget::Stem(Stem::Bing),
        Branch::Hai => VirtueTarget::Stem(Stem::Yi),
        Branch::Zi => VirtueTarget::Branch(Branch::Si),
        Branch::Chou => VirtueTarget::Stem(Stem::Geng),
    }
}

/// 驿马: branch that clashes the first branch of the source's trine.
pub const fn travel_horse(source: Branch) -> Branch {
    match source {
        Branch::Shen | Branch::Zi | Branch::Chen => Branch::Yin,
        Branch::Yin | Branch::Wu | Branch::Xu => Branch::Shen,
        Branch::Si | Branch::You | Branch::Chou => Branch::Hai,
        Branch::Hai | Branch::Mao | Branch::Wei => Branch::Si,
    }
}

/// 咸池: bathing branch of the source's trine.
pub const fn romance(source: Branch) -> Branch {
    match source {
        Branch::Shen | Branch::Zi | Branch::Chen => Branch::You,
        Branch::Yin | Branch::Wu | Branch::Xu => Branch::Mao,
        Branch::Si | Branch::You | Branch::Chou => Branch::Wu,
        Branch::Hai | Branch::Mao | Branch::Wei => Branch::Zi,
    }
}

/// 截路空亡: the two hour pillars that are void for a day stem.
pub const fn blocked_road_hours(day_stem: Stem) -> [GanZhi; 2] {
    let branch = match day_stem {
        Stem::Jia | Stem::Ji => Branch::Shen,
        Stem::Yi | Stem::Geng => Branch::Wu,
        Stem::Bing | Stem::Xin => Branch::Chen,
        Stem::Ding | Stem::Ren => Branch::Yin,
        Stem::Wu | Stem::Gui => Branch::Zi,
    };
    let first = GanZhi {
        stem: Stem::Ren,
        branch,
    };
    [first, first.shift(1)]
}
