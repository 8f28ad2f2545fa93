//! Sexagenary pairs (干支), the 60-step cycle built from stems and branches.
//!
//! Index 0 = 甲子 and the cycle advances stem and branch together, so only
//! same-polarity pairs occur. Years follow the cycle with epoch CE 4 = 甲子.
//!
//! Also provides the decade head (旬), the void pair (旬空) and the na-yin
//! (纳音) sound element of each pair.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;
use crate::error::BaseError;
use crate::stem::Stem;

/// Reference epoch: CE 4 = 甲子 (index 0).
pub const GANZHI_EPOCH_YEAR: i32 = 4;

/// A stem/branch pair of matching polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GanZhi {
    pub stem: Stem,
    pub branch: Branch,
}

impl GanZhi {
    /// Build a pair, rejecting mismatched polarity.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        if stem.index() % 2 != branch.index() % 2 {
            return Err(BaseError::InvalidPair {
                stem: stem.symbol(),
                branch: branch.symbol(),
            });
        }
        Ok(Self { stem, branch })
    }

    /// Pair at a cycle index, wrapped mod 60.
    pub const fn from_index(index: i64) -> Self {
        let i = index.rem_euclid(60);
        Self {
            stem: Stem::from_index(i),
            branch: Branch::from_index(i),
        }
    }

    /// 0-based cycle index (甲子=0 .. 癸亥=59).
    pub const fn index(self) -> u8 {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(60) as u8
    }

    /// Pair `steps` positions along the cycle (negative steps go backwards).
    pub const fn shift(self, steps: i64) -> Self {
        Self::from_index(self.index() as i64 + steps)
    }

    /// Head of the decade (旬) this pair belongs to, e.g. 甲子 for 丙寅.
    pub const fn xun_head(self) -> Self {
        self.shift(-(self.stem.index() as i64))
    }

    /// The two branches left uncovered by this pair's decade (旬空).
    pub const fn void_branches(self) -> [Branch; 2] {
        let b = self.branch.index() as i64 - self.stem.index() as i64;
        [Branch::from_index(b + 10), Branch::from_index(b + 11)]
    }

    /// Na-yin (纳音) entry shared by this pair and its partner.
    pub const fn nayin(self) -> NaYin {
        NAYIN_TABLE[(self.index() / 2) as usize]
    }

    /// Sexagenary year pair for a CE year (civil year boundary not applied).
    pub const fn for_year(ce_year: i32) -> Self {
        Self::from_index((ce_year - GANZHI_EPOCH_YEAR) as i64)
    }

    /// Day pair from a Julian Day Number (JDN 2451545 = 2000-01-01 = 戊午).
    pub const fn for_jdn(jdn: i64) -> Self {
        Self::from_index(jdn + 49)
    }

    /// Month pair from the year stem by the five-tiger rule (五虎遁).
    ///
    /// 甲己 years open with 丙寅, 乙庚 with 戊寅, 丙辛 with 庚寅, 丁壬 with
    /// 壬寅, 戊癸 with 甲寅.
    pub const fn month_of(year_stem: Stem, month_branch: Branch) -> Self {
        let sector = (month_branch.index() as i64 - 2).rem_euclid(12);
        Self {
            stem: Stem::from_index((year_stem.index() as i64 % 5) * 2 + 2 + sector),
            branch: month_branch,
        }
    }

    /// Hour pair from the day stem by the five-rat rule (五鼠遁).
    ///
    /// 甲己 days open with 甲子, 乙庚 with 丙子, and so on.
    pub const fn hour_of(day_stem: Stem, hour_branch: Branch) -> Self {
        Self {
            stem: Stem::from_index((day_stem.index() as i64 % 5) * 2 + hour_branch.index() as i64),
            branch: hour_branch,
        }
    }
}

impl Display for GanZhi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

impl FromStr for GanZhi {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(sc), Some(bc), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::UnknownStem(s.to_string()));
        };
        Self::new(Stem::try_from(sc)?, Branch::try_from(bc)?)
    }
}

/// Na-yin sound name and its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NaYin {
    pub name: &'static str,
    pub element: Element,
}

const fn ny(name: &'static str, element: Element) -> NaYin {
    NaYin { name, element }
}

/// One entry per consecutive pair of the cycle (甲子乙丑, 丙寅丁卯, ...).
const NAYIN_TABLE: [NaYin; 30] = [
    ny("海中金", Element::Metal),
    ny("炉中火", Element::Fire),
    ny("大林木", Element::Wood),
    ny("路旁土", Element::Earth),
    ny("剑锋金", Element::Metal),
    ny("山头火", Element::Fire),
    ny("涧下水", Element::Water),
    ny("城头土", Element::Earth),
    ny("白蜡金", Element::Metal),
    ny("杨柳木", Element::Wood),
    ny("泉中水", Element::Water),
    ny("屋上土", Element::Earth),
    ny("霹雳火", Element::Fire),
    ny("松柏木", Element::Wood),
    ny("长流水", Element::Water),
    ny("沙中金", Element::Metal),
    ny("山下火", Element::Fire),
    ny("平地木", Element::Wood),
    ny("壁上土", Element::Earth),
    ny("金箔金", Element::Metal),
    ny("覆灯火", Element::Fire),
    ny("天河水", Element::Water),
    ny("大驿土", Element::Earth),
    ny("钗钏金", Element::Metal),
    ny("桑柘木", Element::Wood),
    ny("大溪水", Element::Water),
    ny("沙中土", Element::Earth),
    ny("天上火", Element::Fire),
    ny("石榴木", Element::Wood),
    ny("大海水", Element::Water),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for i in 0..60 {
            assert_eq!(GanZhi::from_index(i).index() as i64, i);
        }
    }

    #[test]
    fn mismatched_polarity_rejected() {
        assert!(GanZhi::new(Stem::Jia, Branch::Chou).is_err());
        assert!(GanZhi::new(Stem::Jia, Branch::Zi).is_ok());
    }

    #[test]
    fn five_tiger_month_stems() {
        assert_eq!(GanZhi::month_of(Stem::Jia, Branch::Yin).to_string(), "丙寅");
        assert_eq!(GanZhi::month_of(Stem::Wu, Branch::Yin).to_string(), "甲寅");
        assert_eq!(GanZhi::month_of(Stem::Ji, Branch::Zi).to_string(), "丙子");
        assert_eq!(GanZhi::month_of(Stem::Ji, Branch::Chou).to_string(), "丁丑");
    }

    #[test]
    fn five_rat_hour_stems() {
        assert_eq!(GanZhi::hour_of(Stem::Jia, Branch::Zi).to_string(), "甲子");
        assert_eq!(GanZhi::hour_of(Stem::Bing, Branch::Wu).to_string(), "甲午");
        assert_eq!(GanZhi::hour_of(Stem::Gui, Branch::Hai).to_string(), "癸亥");
    }

    #[test]
    fn year_1984_is_jiazi() {
        assert_eq!(GanZhi::for_year(1984).to_string(), "甲子");
    }

    #[test]
    fn year_1989_is_jisi() {
        assert_eq!(GanZhi::for_year(1989).to_string(), "己巳");
    }

    #[test]
    fn year_before_epoch_wraps() {
        // 3 CE: one step before 甲子
        assert_eq!(GanZhi::for_year(3).to_string(), "癸亥");
    }

    #[test]
    fn day_2000_01_01_is_wuwu() {
        assert_eq!(GanZhi::for_jdn(2_451_545).to_string(), "戊午");
    }

    #[test]
    fn jiazi_xun_void_is_xu_hai() {
        let gz: GanZhi = "丙寅".parse().unwrap();
        assert_eq!(gz.xun_head().to_string(), "甲子");
        assert_eq!(gz.void_branches(), [Branch::Xu, Branch::Hai]);
    }

    #[test]
    fn jiaxu_xun_void_is_shen_you() {
        let gz: GanZhi = "癸未".parse().unwrap();
        assert_eq!(gz.xun_head().to_string(), "甲戌");
        assert_eq!(gz.void_branches(), [Branch::Shen, Branch::You]);
    }

    #[test]
    fn nayin_samples() {
        assert_eq!("甲子".parse::<GanZhi>().unwrap().nayin().name, "海中金");
        assert_eq!("乙丑".parse::<GanZhi>().unwrap().nayin().name, "海中金");
        assert_eq!("己巳".parse::<GanZhi>().unwrap().nayin().name, "大林木");
        assert_eq!("癸亥".parse::<GanZhi>().unwrap().nayin().element, Element::Water);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("甲".parse::<GanZhi>().is_err());
        assert!("甲子丑".parse::<GanZhi>().is_err());
        assert!("子甲".parse::<GanZhi>().is_err());
    }
}
