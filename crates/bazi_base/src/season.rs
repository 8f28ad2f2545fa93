//! Seasonal status (旺相休囚死) of the five elements in a governing month.
//!
//! The month's season element is thriving; the element it generates is
//! supported; the element that generates it rests; the element that controls
//! it is trapped; the element it controls is dead. For any month this is a
//! permutation of the five statuses over the five elements.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;

/// Seasonal status, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeasonalStatus {
    /// 旺
    Thriving,
    /// 相
    Supported,
    /// 休
    Resting,
    /// 囚
    Trapped,
    /// 死
    Dead,
}

/// All 5 statuses, strongest first.
pub const ALL_SEASONAL_STATUSES: [SeasonalStatus; 5] = [
    SeasonalStatus::Thriving,
    SeasonalStatus::Supported,
    SeasonalStatus::Resting,
    SeasonalStatus::Trapped,
    SeasonalStatus::Dead,
];

impl SeasonalStatus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Thriving => "旺",
            Self::Supported => "相",
            Self::Resting => "休",
            Self::Trapped => "囚",
            Self::Dead => "死",
        }
    }

    /// Multiplicative factor applied to an element's raw score.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Thriving => 1.3,
            Self::Supported => 1.1,
            Self::Resting => 0.9,
            Self::Trapped => 0.7,
            Self::Dead => 0.5,
        }
    }
}

/// Status of `element` in the month governed by `month_branch`.
pub const fn seasonal_status(month_branch: Branch, element: Element) -> SeasonalStatus {
    let season = month_branch.season_element();
    let step = (element.index() + 5 - season.index()) % 5;
    match step {
        0 => SeasonalStatus::Thriving,
        1 => SeasonalStatus::Supported,
        2 => SeasonalStatus::Dead,
        3 => SeasonalStatus::Trapped,
        _ => SeasonalStatus::Resting,
    }
}
