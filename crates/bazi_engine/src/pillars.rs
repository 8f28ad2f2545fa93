//! Four-pillar extraction on top of the calendar primitive.

use std::fmt::{Display, Formatter};

use bazi_almanac::{CalendarPrimitive, LunarDate, RawPillar, TermContext};
use bazi_base::{Branch, Element, GanZhi, HiddenDepth, LifeStage, NaYin, Stem, TenGod, life_stage};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::birth::{ChartConfig, MonthMode};
use crate::error::EngineError;
use crate::trace::{Stage, Tracer};

/// Chart position of a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Year,
    Month,
    Day,
    Hour,
}

pub const ALL_POSITIONS: [Position; 4] =
    [Position::Year, Position::Month, Position::Day, Position::Hour];

impl Position {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "年柱",
            Self::Month => "月柱",
            Self::Day => "日柱",
            Self::Hour => "时柱",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A hidden stem with its depth and role toward the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub depth: HiddenDepth,
    pub ten_god: TenGod,
}

/// One fully annotated pillar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pillar {
    pub position: Position,
    pub ganzhi: GanZhi,
    /// Role of the stem toward the day stem; `None` for the day stem itself.
    pub ten_god: Option<TenGod>,
    pub hidden: Vec<HiddenStem>,
    /// Element of the branch.
    pub element: Element,
    pub nayin: NaYin,
    pub xun: GanZhi,
    pub void_branches: [Branch; 2],
    /// Day stem's life stage at this branch (地势).
    pub life_stage: LifeStage,
}

impl Pillar {
    pub fn stem(&self) -> Stem {
        self.ganzhi.stem
    }

    pub fn branch(&self) -> Branch {
        self.ganzhi.branch
    }

    pub fn hidden_stems(&self) -> impl Iterator<Item = Stem> + '_ {
        self.hidden.iter().map(|h| h.stem)
    }
}

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// Which boundary the month pillar was taken from.
    pub month_mode: MonthMode,
}

impl FourPillars {
    pub fn all(&self) -> [&Pillar; 4] {
        [&self.year, &self.month, &self.day, &self.hour]
    }

    pub fn get(&self, position: Position) -> &Pillar {
        match position {
            Position::Year => &self.year,
            Position::Month => &self.month,
            Position::Day => &self.day,
            Position::Hour => &self.hour,
        }
    }

    pub fn day_stem(&self) -> Stem {
        self.day.stem()
    }

    pub fn day_element(&self) -> Element {
        self.day.stem().element()
    }

    pub fn month_branch(&self) -> Branch {
        self.month.branch()
    }

    /// Stems of the year, month and hour pillars.
    pub fn outer_stems(&self) -> [(Position, Stem); 3] {
        [
            (Position::Year, self.year.stem()),
            (Position::Month, self.month.stem()),
            (Position::Hour, self.hour.stem()),
        ]
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year.ganzhi, self.month.ganzhi, self.day.ganzhi, self.hour.ganzhi)
    }
}

/// Output of the pillar stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarExtraction {
    pub pillars: FourPillars,
    /// Sectional terms bracketing the instant.
    pub terms: TermContext,
    /// Lunisolar date of the corrected instant.
    pub lunar: LunarDate,
}

/// Check a primitive pillar against the fixed tables.
pub(crate) fn validate(raw: &RawPillar) -> Result<GanZhi, EngineError> {
    let gz = GanZhi::new(raw.stem, raw.branch).map_err(|_| EngineError::MissingLookupEntry {
        table: "sexagenary cycle",
        key: format!("{}{}", raw.stem, raw.branch),
    })?;
    if raw.hidden_stems.is_empty() || raw.hidden_stems.len() > 3 {
        return Err(EngineError::MissingLookupEntry {
            table: "hidden stems",
            key: raw.branch.to_string(),
        });
    }
    Ok(gz)
}

fn annotate(
    position: Position,
    ganzhi: GanZhi,
    hidden_stems: &[Stem],
    day_stem: Stem,
) -> Pillar {
    Pillar {
        position,
        ganzhi,
        ten_god: (position != Position::Day).then(|| TenGod::of(day_stem, ganzhi.stem)),
        hidden: hidden_stems
            .iter()
            .enumerate()
            .map(|(i, &stem)| HiddenStem {
                stem,
                depth: HiddenDepth::from_position(i),
                ten_god: TenGod::of(day_stem, stem),
            })
            .collect(),
        element: ganzhi.branch.element(),
        nayin: ganzhi.nayin(),
        xun: ganzhi.xun_head(),
        void_branches: ganzhi.void_branches(),
        life_stage: life_stage(day_stem, ganzhi.branch),
    }
}

/// Derive the four pillars of the corrected instant.
pub fn extract_pillars<C: CalendarPrimitive>(
    primitive: &C,
    instant: NaiveDateTime,
    config: &ChartConfig,
    tracer: &mut Tracer,
) -> Result<PillarExtraction, EngineError> {
    let raw = primitive.raw_pillars(instant, config.hour_boundary_mode)?;
    let terms = primitive.term_context(instant)?;
    let lunar = primitive.solar_to_lunar(instant.date())?;

    let month_raw = match config.month_mode {
        MonthMode::SolarTerm => raw.month,
        MonthMode::LunarMonth => {
            let m = primitive.lunar_month_pillar(lunar)?;
            tracer.record(
                Stage::Pillars,
                format!(
                    "month pillar re-derived from lunar month {}{}: {}{}",
                    if lunar.leap { "闰" } else { "" },
                    lunar.month,
                    m.stem,
                    m.branch
                ),
            );
            m
        }
    };

    let year = validate(&raw.year)?;
    let month = validate(&month_raw)?;
    let day = validate(&raw.day)?;
    let hour = validate(&raw.hour)?;
    let day_stem = day.stem;

    let pillars = FourPillars {
        year: annotate(Position::Year, year, &raw.year.hidden_stems, day_stem),
        month: annotate(Position::Month, month, &month_raw.hidden_stems, day_stem),
        day: annotate(Position::Day, day, &raw.day.hidden_stems, day_stem),
        hour: annotate(Position::Hour, hour, &raw.hour.hidden_stems, day_stem),
        month_mode: config.month_mode,
    };
    tracer.record(
        Stage::Pillars,
        format!(
            "pillars {pillars}; previous term {} {}, next term {} {}",
            terms.prev.term.name(),
            terms.prev.instant,
            terms.next.term.name(),
            terms.next.instant
        ),
    );
    Ok(PillarExtraction {
        pillars,
        terms,
        lunar,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bazi_time::parse_civil;

    /// Pillars built straight from four pairs, for stage tests.
    pub(crate) fn pillars_of(names: [&str; 4]) -> FourPillars {
        let gz: Vec<GanZhi> = names.iter().map(|n| n.parse().unwrap()).collect();
        let day_stem = gz[2].stem;
        let p = |pos: Position| {
            let g = gz[pos.index()];
            annotate(pos, g, g.branch.hidden_stems(), day_stem)
        };
        FourPillars {
            year: p(Position::Year),
            month: p(Position::Month),
            day: p(Position::Day),
            hour: p(Position::Hour),
            month_mode: MonthMode::SolarTerm,
        }
    }

    #[test]
    fn annotations_of_1990_chart() {
        let p = pillars_of(["己巳", "丙子", "丙寅", "甲午"]);
        assert_eq!(p.to_string(), "己巳 丙子 丙寅 甲午");
        assert_eq!(p.day.ten_god, None);
        assert_eq!(p.year.ten_god, Some(TenGod::HurtingOfficer));
        assert_eq!(p.hour.ten_god, Some(TenGod::IndirectResource));
        assert_eq!(p.month.hidden[0].ten_god, TenGod::DirectOfficer);
        assert_eq!(p.day.nayin.name, "炉中火");
        assert_eq!(p.day.xun.to_string(), "甲子");
        assert_eq!(p.day.void_branches, [Branch::Xu, Branch::Hai]);
        // 丙 at 寅 is 长生.
        assert_eq!(p.day.life_stage, LifeStage::Nascent);
    }

    #[test]
    fn lunar_month_mode_replaces_month_pillar() {
        // 2023-04-01 is leap month 2 of 癸卯: month pillar 乙卯, while the
        // sectional-term month after 清明 (Apr 5) has not begun, so 乙卯 too.
        // 2023-04-10 sits in 丙辰 by term but still leap month 2 by lunation.
        let t = parse_civil("2023-04-10 10:00:00").unwrap();
        let almanac = bazi_almanac::Almanac::new();
        let solar = extract_pillars(&almanac, t, &ChartConfig::default(), &mut Tracer::new()).unwrap();
        let lunar_cfg = ChartConfig {
            month_mode: MonthMode::LunarMonth,
            ..ChartConfig::default()
        };
        let lunar = extract_pillars(&almanac, t, &lunar_cfg, &mut Tracer::new()).unwrap();
        assert_eq!(solar.pillars.month.ganzhi.to_string(), "丙辰");
        assert_eq!(lunar.pillars.month.ganzhi.to_string(), "乙卯");
        assert!(lunar.lunar.leap);
        assert_eq!(solar.pillars.day, lunar.pillars.day);
    }
}
