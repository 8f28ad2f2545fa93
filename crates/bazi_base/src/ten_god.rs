//! Ten-god (十神) relations of a stem to the day stem.
//!
//! The relation depends on the element step from the day stem
//! (same, generated, controlled, controlling, generating) and on whether the
//! two stems share polarity.

use serde::{Deserialize, Serialize};

use crate::stem::Stem;

/// The ten relational roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    /// 比肩, peer
    Companion,
    /// 劫财, rival
    RobWealth,
    /// 食神, output
    EatingGod,
    /// 伤官, expression
    HurtingOfficer,
    /// 偏财
    IndirectWealth,
    /// 正财
    DirectWealth,
    /// 七杀, dominance
    SevenKillings,
    /// 正官, authority
    DirectOfficer,
    /// 偏印
    IndirectResource,
    /// 正印
    DirectResource,
}

/// Element-level grouping of the ten gods (pairs sharing an element step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGodFamily {
    /// 比劫
    Peer,
    /// 食伤
    Output,
    /// 财
    Wealth,
    /// 官杀
    Authority,
    /// 印
    Resource,
}

impl TenGod {
    /// Relation of `other` to `day`.
    pub const fn of(day: Stem, other: Stem) -> Self {
        let step = (other.element().index() + 5 - day.element().index()) % 5;
        let same = day.index() % 2 == other.index() % 2;
        match (step, same) {
            (0, true) => Self::Companion,
            (0, false) => Self::RobWealth,
            (1, true) => Self::EatingGod,
            (1, false) => Self::HurtingOfficer,
            (2, true) => Self::IndirectWealth,
            (2, false) => Self::DirectWealth,
            (3, true) => Self::SevenKillings,
            (3, false) => Self::DirectOfficer,
            (_, true) => Self::IndirectResource,
            (_, false) => Self::DirectResource,
        }
    }

    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }

    pub const fn family(self) -> TenGodFamily {
        match self {
            Self::Companion | Self::RobWealth => TenGodFamily::Peer,
            Self::EatingGod | Self::HurtingOfficer => TenGodFamily::Output,
            Self::IndirectWealth | Self::DirectWealth => TenGodFamily::Wealth,
            Self::SevenKillings | Self::DirectOfficer => TenGodFamily::Authority,
            Self::IndirectResource | Self::DirectResource => TenGodFamily::Resource,
        }
    }

    pub const fn is_resource(self) -> bool {
        matches!(self.family(), TenGodFamily::Resource)
    }
}

impl TenGodFamily {
    /// Chinese name of the family.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peer => "比劫",
            Self::Output => "食伤",
            Self::Wealth => "财星",
            Self::Authority => "官杀",
            Self::Resource => "印绶",
        }
    }

    /// Family of an element step from the day element (0..5).
    pub const fn from_step(step: u8) -> Self {
        match step % 5 {
            0 => Self::Peer,
            1 => Self::Output,
            2 => Self::Wealth,
            3 => Self::Authority,
            _ => Self::Resource,
        }
    }
}
