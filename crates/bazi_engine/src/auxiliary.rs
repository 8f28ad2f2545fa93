//! Auxiliary palaces: conception (胎元), life (命宫) and body (身宫).

use bazi_base::{Branch, GanZhi, NaYin};
use serde::Serialize;

use crate::pillars::FourPillars;
use crate::trace::{Stage, Tracer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palace {
    pub pillar: GanZhi,
    pub nayin: NaYin,
}

impl Palace {
    fn new(pillar: GanZhi) -> Self {
        Self {
            pillar,
            nayin: pillar.nayin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuxiliaryPalaces {
    pub conception: Palace,
    pub life: Palace,
    pub body: Palace,
}

/// Month number of a branch counted from 寅 = 1 to 丑 = 12.
const fn month_number(branch: Branch) -> i64 {
    (branch.index() as i64 - 2).rem_euclid(12) + 1
}

const fn branch_of_month_number(number: i64) -> Branch {
    Branch::from_index(number + 1)
}

/// Month stem +1, month branch +3.
pub fn conception_pillar(month: GanZhi) -> GanZhi {
    GanZhi {
        stem: month.stem.shift(1),
        branch: month.branch.shift(3),
    }
}

/// Life palace: counted back from the month and hour branches.
pub fn life_palace(year: GanZhi, month_branch: Branch, hour_branch: Branch) -> GanZhi {
    let sum = month_number(month_branch) + month_number(hour_branch);
    let number = if sum >= 14 { 26 - sum } else { 14 - sum };
    GanZhi::month_of(year.stem, branch_of_month_number(number))
}

/// Body palace: counted forward from the month and hour branches.
pub fn body_palace(year: GanZhi, month_branch: Branch, hour_branch: Branch) -> GanZhi {
    let sum = month_number(month_branch) + month_number(hour_branch);
    let number = if sum > 12 { sum - 12 } else { sum };
    GanZhi::month_of(year.stem, branch_of_month_number(number))
}

pub fn auxiliary_palaces(pillars: &FourPillars, tracer: &mut Tracer) -> AuxiliaryPalaces {
    let year = pillars.year.ganzhi;
    let (month, hour) = (pillars.month.branch(), pillars.hour.branch());
    let palaces = AuxiliaryPalaces {
        conception: Palace::new(conception_pillar(pillars.month.ganzhi)),
        life: Palace::new(life_palace(year, month, hour)),
        body: Palace::new(body_palace(year, month, hour)),
    };
    tracer.record(
        Stage::Auxiliary,
        format!(
            "胎元 {}({}), 命宫 {}({}), 身宫 {}({})",
            palaces.conception.pillar,
            palaces.conception.nayin.name,
            palaces.life.pillar,
            palaces.life.nayin.name,
            palaces.body.pillar,
            palaces.body.nayin.name
        ),
    );
    palaces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::tests::pillars_of;

    fn gz(s: &str) -> GanZhi {
        s.parse().unwrap()
    }

    #[test]
    fn month_numbers_start_at_yin() {
        assert_eq!(month_number(Branch::Yin), 1);
        assert_eq!(month_number(Branch::Zi), 11);
        assert_eq!(month_number(Branch::Chou), 12);
        assert_eq!(branch_of_month_number(12), Branch::Chou);
    }

    #[test]
    fn palaces_of_1990_chart() {
        let p = auxiliary_palaces(&pillars_of(["己巳", "丙子", "丙寅", "甲午"]), &mut Tracer::new());
        assert_eq!(p.conception.pillar, gz("丁卯"));
        assert_eq!(p.conception.nayin.name, "炉中火");
        // 子 (11) + 午 (5) = 16: life 26 - 16 = 10 (亥), body 16 - 12 = 4 (巳).
        assert_eq!(p.life.pillar, gz("乙亥"));
        assert_eq!(p.life.nayin.name, "山头火");
        assert_eq!(p.body.pillar, gz("己巳"));
        assert_eq!(p.body.nayin.name, "大林木");
    }

    #[test]
    fn small_sum_counts_back_from_fourteen() {
        // 寅 month (1) + 寅 hour (1) = 2: life 12 (丑), body 2 (卯).
        let year = gz("甲子");
        assert_eq!(life_palace(year, Branch::Yin, Branch::Yin), gz("丁丑"));
        assert_eq!(body_palace(year, Branch::Yin, Branch::Yin), gz("丁卯"));
    }
}
