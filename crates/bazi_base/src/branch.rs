//! The 12 earthly branches (地支) and their hidden stems (藏干).
//!
//! Each branch embeds one to three stems, ordered main (本气), medium (中气)
//! and residual (余气).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::stem::Stem;

/// The 12 branches starting from Zi (子).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (0 = Zi, 11 = Hai).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese character.
    pub const fn symbol(self) -> char {
        match self {
            Self::Zi => '子',
            Self::Chou => '丑',
            Self::Yin => '寅',
            Self::Mao => '卯',
            Self::Chen => '辰',
            Self::Si => '巳',
            Self::Wu => '午',
            Self::Wei => '未',
            Self::Shen => '申',
            Self::You => '酉',
            Self::Xu => '戌',
            Self::Hai => '亥',
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "Zi",
            Self::Chou => "Chou",
            Self::Yin => "Yin",
            Self::Mao => "Mao",
            Self::Chen => "Chen",
            Self::Si => "Si",
            Self::Wu => "Wu",
            Self::Wei => "Wei",
            Self::Shen => "Shen",
            Self::You => "You",
            Self::Xu => "Xu",
            Self::Hai => "Hai",
        }
    }

    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch from any integer index, wrapped mod 12.
    pub const fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// Branch shifted by `steps` positions (negative steps go backwards).
    pub const fn shift(self, steps: i64) -> Self {
        Self::from_index(self.index() as i64 + steps)
    }

    /// Element of the branch itself.
    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Element of the season a month branch governs.
    ///
    /// 寅卯 spring Wood, 巳午 summer Fire, 申酉 autumn Metal, 亥子 winter Water,
    /// and the four storehouse months 辰戌丑未 Earth.
    pub const fn season_element(self) -> Element {
        self.element()
    }

    /// Hidden stems, main first.
    pub const fn hidden_stems(self) -> &'static [Stem] {
        match self {
            Self::Zi => &[Stem::Gui],
            Self::Chou => &[Stem::Ji, Stem::Gui, Stem::Xin],
            Self::Yin => &[Stem::Jia, Stem::Bing, Stem::Wu],
            Self::Mao => &[Stem::Yi],
            Self::Chen => &[Stem::Wu, Stem::Yi, Stem::Gui],
            Self::Si => &[Stem::Bing, Stem::Geng, Stem::Wu],
            Self::Wu => &[Stem::Ding, Stem::Ji],
            Self::Wei => &[Stem::Ji, Stem::Ding, Stem::Yi],
            Self::Shen => &[Stem::Geng, Stem::Ren, Stem::Wu],
            Self::You => &[Stem::Xin],
            Self::Xu => &[Stem::Wu, Stem::Xin, Stem::Ding],
            Self::Hai => &[Stem::Ren, Stem::Jia],
        }
    }

    /// Main hidden stem (本气).
    pub const fn main_stem(self) -> Stem {
        self.hidden_stems()[0]
    }

    /// Double-hour branch of a clock hour (子 = 23:00–00:59).
    pub const fn for_hour(hour: u32) -> Self {
        Self::from_index(((hour + 1) / 2) as i64)
    }

    /// The branch directly opposite (six apart).
    pub const fn opposite(self) -> Self {
        self.shift(6)
    }

    /// All 12 branches in order.
    pub const fn all() -> &'static [Branch; 12] {
        &ALL_BRANCHES
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Branch {
    type Error = BaseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        ALL_BRANCHES
            .iter()
            .copied()
            .find(|b| b.symbol() == c)
            .ok_or_else(|| BaseError::UnknownBranch(c.to_string()))
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(BaseError::UnknownBranch(s.to_string())),
        }
    }
}

/// Depth of a hidden stem inside its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HiddenDepth {
    /// 本气
    Main,
    /// 中气
    Medium,
    /// 余气
    Residual,
}

impl HiddenDepth {
    /// Depth from position within the hidden-stem list.
    pub const fn from_position(pos: usize) -> Self {
        match pos {
            0 => Self::Main,
            1 => Self::Medium,
            _ => Self::Residual,
        }
    }

    /// Root weight applied when scoring hidden stems.
    pub const fn root_weight(self) -> f64 {
        match self {
            Self::Main => 3.0,
            Self::Medium => 1.5,
            Self::Residual => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_branches_count() {
        assert_eq!(ALL_BRANCHES.len(), 12);
    }

    #[test]
    fn indices_sequential() {
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn hidden_stems_one_to_three() {
        for b in ALL_BRANCHES {
            let n = b.hidden_stems().len();
            assert!((1..=3).contains(&n), "{b} has {n} hidden stems");
        }
    }

    #[test]
    fn main_stem_shares_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(b.main_stem().element(), b.element(), "branch {b}");
        }
    }

    #[test]
    fn hour_branches() {
        assert_eq!(Branch::for_hour(23), Branch::Zi);
        assert_eq!(Branch::for_hour(0), Branch::Zi);
        assert_eq!(Branch::for_hour(1), Branch::Chou);
        assert_eq!(Branch::for_hour(12), Branch::Wu);
        assert_eq!(Branch::for_hour(22), Branch::Hai);
    }

    #[test]
    fn opposite_is_involution() {
        for b in ALL_BRANCHES {
            assert_eq!(b.opposite().opposite(), b);
        }
        assert_eq!(Branch::Zi.opposite(), Branch::Wu);
        assert_eq!(Branch::Si.opposite(), Branch::Hai);
    }

    #[test]
    fn depth_from_position() {
        assert_eq!(HiddenDepth::from_position(0), HiddenDepth::Main);
        assert_eq!(HiddenDepth::from_position(1), HiddenDepth::Medium);
        assert_eq!(HiddenDepth::from_position(2), HiddenDepth::Residual);
    }
}
