//! Star (神煞) detection over the four pillars.

use bazi_base::{
    StarKind, VirtueTarget, blocked_road_hours, heaven_virtue, heavenly_noble, month_virtue,
    romance, travel_horse,
};
use serde::Serialize;

use crate::pillars::{FourPillars, Position};
use crate::trace::{Stage, Tracer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Star {
    pub kind: StarKind,
    pub position: Position,
    pub name: &'static str,
    pub description: &'static str,
    pub auspicious: bool,
}

impl Star {
    fn new(kind: StarKind, position: Position) -> Self {
        Self {
            kind,
            position,
            name: kind.name(),
            description: kind.description(),
            auspicious: kind.is_auspicious(),
        }
    }
}

#[derive(Default)]
struct StarSet(Vec<Star>);

impl StarSet {
    /// Add a marker unless the same kind already sits at `position`.
    fn mark(&mut self, kind: StarKind, position: Position) {
        if !self.0.iter().any(|s| s.kind == kind && s.position == position) {
            self.0.push(Star::new(kind, position));
        }
    }
}

pub fn detect_stars(pillars: &FourPillars, tracer: &mut Tracer) -> Vec<Star> {
    let day_stem = pillars.day_stem();
    let month_branch = pillars.month_branch();
    let sources = [pillars.year.branch(), pillars.day.branch()];
    let mut found = StarSet::default();

    let nobles = heavenly_noble(day_stem);
    for p in pillars.all() {
        if nobles.contains(&p.branch()) {
            found.mark(StarKind::HeavenlyNoble, p.position);
        }
    }

    let virtue = month_virtue(month_branch);
    for p in pillars.all() {
        if p.stem() == virtue {
            found.mark(StarKind::MonthVirtue, p.position);
        }
    }

    let heaven = heaven_virtue(month_branch);
    for p in pillars.all() {
        let hit = match heaven {
            VirtueTarget::Stem(s) => p.stem() == s,
            VirtueTarget::Branch(b) => p.branch() == b,
        };
        if hit {
            found.mark(StarKind::HeavenVirtue, p.position);
        }
    }

    for p in pillars.all() {
        if sources.iter().any(|&s| travel_horse(s) == p.branch()) {
            found.mark(StarKind::TravelHorse, p.position);
        }
        if sources.iter().any(|&s| romance(s) == p.branch()) {
            found.mark(StarKind::Romance, p.position);
        }
    }

    if blocked_road_hours(day_stem).contains(&pillars.hour.ganzhi) {
        found.mark(StarKind::BlockedRoadVoid, Position::Hour);
    }

    let stars = found.0;
    tracer.record_value(
        Stage::Stars,
        format!("{} star marker(s) found", stars.len()),
        stars.len() as f64,
    );
    stars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::tests::pillars_of;

    fn detect(names: [&str; 4]) -> Vec<(StarKind, Position)> {
        detect_stars(&pillars_of(names), &mut Tracer::new())
            .into_iter()
            .map(|s| (s.kind, s.position))
            .collect()
    }

    #[test]
    fn chart_of_1990() {
        // 丙 day: nobles 亥 酉, none present. 子 month: 月德 壬, 天德 巳.
        // Sources 巳 寅: horse 亥/申, romance 午/卯.
        let stars = detect(["己巳", "丙子", "丙寅", "甲午"]);
        assert_eq!(
            stars,
            vec![
                (StarKind::HeavenVirtue, Position::Year),
                (StarKind::Romance, Position::Hour),
            ]
        );
    }

    #[test]
    fn travel_horse_from_either_source() {
        // Year 申 and day 子 both point at 寅; the month 寅 is marked once.
        let stars = detect(["庚申", "戊寅", "甲子", "甲子"]);
        let horses: Vec<_> = stars.iter().filter(|(k, _)| *k == StarKind::TravelHorse).collect();
        assert_eq!(horses, vec![&(StarKind::TravelHorse, Position::Month)]);
    }

    #[test]
    fn blocked_road_reads_the_hour_pillar() {
        // 甲 day with 壬申 hour.
        let stars = detect(["甲子", "丙寅", "甲子", "壬申"]);
        assert!(stars.contains(&(StarKind::BlockedRoadVoid, Position::Hour)));
    }

    #[test]
    fn heaven_virtue_by_stem() {
        // 寅 month looks for 丁 among the stems.
        let stars = detect(["丁卯", "壬寅", "甲子", "甲子"]);
        assert!(stars.contains(&(StarKind::HeavenVirtue, Position::Year)));
        assert!(!stars.iter().any(|(k, _)| *k == StarKind::MonthVirtue));
    }
}
