//! The 24 solar terms (节气).
//!
//! Terms sit every 15 degrees of apparent solar longitude. Ordered here as
//! they fall in a civil year, starting from 小寒 (285°). Even positions are
//! the sectional terms (节) that open a month; odd positions are the
//! mid-month principal terms (中气).

use serde::{Deserialize, Serialize};

use crate::branch::Branch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SolarTerm {
    XiaoHan,
    DaHan,
    LiChun,
    YuShui,
    JingZhe,
    ChunFen,
    QingMing,
    GuYu,
    LiXia,
    XiaoMan,
    MangZhong,
    XiaZhi,
    XiaoShu,
    DaShu,
    LiQiu,
    ChuShu,
    BaiLu,
    QiuFen,
    HanLu,
    ShuangJiang,
    LiDong,
    XiaoXue,
    DaXue,
    DongZhi,
}

/// All 24 terms in civil-year order (0 = 小寒).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::XiaoHan,
    SolarTerm::DaHan,
    SolarTerm::LiChun,
    SolarTerm::YuShui,
    SolarTerm::JingZhe,
    SolarTerm::ChunFen,
    SolarTerm::QingMing,
    SolarTerm::GuYu,
    SolarTerm::LiXia,
    SolarTerm::XiaoMan,
    SolarTerm::MangZhong,
    SolarTerm::XiaZhi,
    SolarTerm::XiaoShu,
    SolarTerm::DaShu,
    SolarTerm::LiQiu,
    SolarTerm::ChuShu,
    SolarTerm::BaiLu,
    SolarTerm::QiuFen,
    SolarTerm::HanLu,
    SolarTerm::ShuangJiang,
    SolarTerm::LiDong,
    SolarTerm::XiaoXue,
    SolarTerm::DaXue,
    SolarTerm::DongZhi,
];

impl SolarTerm {
    pub const fn name(self) -> &'static str {
        match self {
            Self::XiaoHan => "小寒",
            Self::DaHan => "大寒",
            Self::LiChun => "立春",
            Self::YuShui => "雨水",
            Self::JingZhe => "惊蛰",
            Self::ChunFen => "春分",
            Self::QingMing => "清明",
            Self::GuYu => "谷雨",
            Self::LiXia => "立夏",
            Self::XiaoMan => "小满",
            Self::MangZhong => "芒种",
            Self::XiaZhi => "夏至",
            Self::XiaoShu => "小暑",
            Self::DaShu => "大暑",
            Self::LiQiu => "立秋",
            Self::ChuShu => "处暑",
            Self::BaiLu => "白露",
            Self::QiuFen => "秋分",
            Self::HanLu => "寒露",
            Self::ShuangJiang => "霜降",
            Self::LiDong => "立冬",
            Self::XiaoXue => "小雪",
            Self::DaXue => "大雪",
            Self::DongZhi => "冬至",
        }
    }

    /// 0-based index in civil-year order.
    pub fn index(self) -> u8 {
        ALL_SOLAR_TERMS
            .iter()
            .position(|&t| t == self)
            .map_or(0, |i| i as u8)
    }

    /// Term at any integer index, wrapped mod 24.
    pub fn from_index(index: i64) -> Self {
        ALL_SOLAR_TERMS[index.rem_euclid(24) as usize]
    }

    /// Apparent solar longitude of the term in degrees.
    pub fn longitude_deg(self) -> f64 {
        (285.0 + 15.0 * f64::from(self.index())) % 360.0
    }

    /// Term whose longitude is `lon_deg`, if it is a multiple of 15.
    pub fn from_longitude(lon_deg: f64) -> Option<Self> {
        let steps = (lon_deg - 285.0).rem_euclid(360.0) / 15.0;
        if (steps - steps.round()).abs() > 1e-9 {
            return None;
        }
        Some(Self::from_index(steps.round() as i64))
    }

    /// Sectional terms (节) open a month.
    pub fn is_sectional(self) -> bool {
        self.index() % 2 == 0
    }

    /// Month branch opened by a sectional term (小寒 → 丑, 立春 → 寅, ...).
    ///
    /// For a principal term, the branch of the month it falls in.
    pub fn month_branch(self) -> Branch {
        Branch::from_index(1 + i64::from(self.index() / 2))
    }
}
