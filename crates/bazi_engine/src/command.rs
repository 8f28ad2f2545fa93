//! Month command (人元司令): which hidden stem governs at the birth instant.

use bazi_almanac::TermContext;
use bazi_base::{Branch, Stem, command_spans, commanding_stem};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::pillars::{FourPillars, Position};
use crate::trace::{Stage, Tracer};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCommand {
    /// Branch of the month opened by the previous sectional term.
    pub branch: Branch,
    pub stem: Stem,
    /// Days since the previous sectional term, fractional.
    pub elapsed_days: f64,
    /// 0-based sub-period index.
    pub span_index: usize,
    /// 1-based day within the commanding sub-period.
    pub day_in_span: u32,
    /// Commanding stem also stands among the year, month or hour stems.
    pub true_qi_induced: bool,
    pub induced_at: Vec<Position>,
    pub detail: String,
}

/// Locate the commanding stem of `instant` within its month.
pub fn month_command(
    instant: NaiveDateTime,
    terms: &TermContext,
    pillars: &FourPillars,
    tracer: &mut Tracer,
) -> MonthCommand {
    let branch = terms.prev.term.month_branch();
    let elapsed_days = (instant - terms.prev.instant).num_seconds() as f64 / SECONDS_PER_DAY;
    tracer.record_value(
        Stage::MonthCommand,
        format!("month branch {branch}, {elapsed_days:.2} days since {}", terms.prev.term.name()),
        elapsed_days,
    );

    let lookup = commanding_stem(branch, elapsed_days);
    let spans = command_spans(branch);
    let before: f64 = spans[..lookup.span_index]
        .iter()
        .map(|s| f64::from(s.days))
        .sum();
    // Clamped to the span length; an exact boundary or an overflow counts as the last day.
    let span_len = u32::from(spans[lookup.span_index].days);
    let day_in_span = ((elapsed_days - before).floor().max(0.0) as u32 + 1).min(span_len);

    let induced_at: Vec<Position> = pillars
        .outer_stems()
        .iter()
        .filter(|(_, s)| *s == lookup.stem)
        .map(|(p, _)| *p)
        .collect();
    let true_qi_induced = !induced_at.is_empty();
    if true_qi_induced {
        tracer.record(
            Stage::MonthCommand,
            format!("commanding stem {} stands in the heavenly stems, true qi induced", lookup.stem),
        );
    }
    if lookup.overflowed {
        tracer.record(
            Stage::MonthCommand,
            "elapsed days past the sub-period table, last stem commands",
        );
    }

    let mut detail = format!("处于{}司权第{}天", lookup.stem, day_in_span);
    if true_qi_induced {
        detail.push_str(" (真气引出)");
    }
    MonthCommand {
        branch,
        stem: lookup.stem,
        elapsed_days,
        span_index: lookup.span_index,
        day_in_span,
        true_qi_induced,
        induced_at,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::tests::pillars_of;
    use bazi_almanac::TermBoundary;
    use bazi_base::SolarTerm;
    use bazi_time::parse_civil;

    fn ctx(term: SolarTerm, at: &str) -> TermContext {
        let b = TermBoundary {
            term,
            instant: parse_civil(at).unwrap(),
        };
        TermContext { prev: b, next: b }
    }

    #[test]
    fn zi_month_second_span() {
        // 大雪 opens 子: 壬 10 days then 癸 20 days.
        let terms = ctx(SolarTerm::DaXue, "1989-12-07 11:21:00");
        let t = parse_civil("1990-01-01 12:02:10").unwrap();
        let p = pillars_of(["己巳", "丙子", "丙寅", "甲午"]);
        let c = month_command(t, &terms, &p, &mut Tracer::new());
        assert_eq!(c.branch, Branch::Zi);
        assert_eq!(c.stem, Stem::Gui);
        assert_eq!(c.span_index, 1);
        assert_eq!(c.day_in_span, 16);
        assert!(!c.true_qi_induced);
        assert_eq!(c.detail, "处于癸司权第16天");
    }

    #[test]
    fn exact_boundary_belongs_to_earlier_span() {
        let terms = ctx(SolarTerm::LiChun, "2024-02-04 00:00:00");
        let t = parse_civil("2024-02-11 00:00:00").unwrap();
        // Exactly 7 days: still 戊.
        let p = pillars_of(["甲辰", "丙寅", "戊午", "戊午"]);
        let c = month_command(t, &terms, &p, &mut Tracer::new());
        assert_eq!(c.stem, Stem::Wu);
        assert_eq!(c.day_in_span, 7);
        assert!(c.detail.starts_with("处于戊司权第7天"));
        assert!(c.true_qi_induced);
        assert_eq!(c.induced_at, vec![Position::Hour]);
        assert!(c.detail.ends_with("(真气引出)"));
    }

    #[test]
    fn overflow_stays_on_last_day() {
        // 31.5 days after 立春 runs past the 30-day table; 甲 commands its 16th day.
        let terms = ctx(SolarTerm::LiChun, "2024-02-04 00:00:00");
        let t = parse_civil("2024-03-06 12:00:00").unwrap();
        let p = pillars_of(["甲辰", "丙寅", "戊午", "戊午"]);
        let c = month_command(t, &terms, &p, &mut Tracer::new());
        assert_eq!(c.stem, Stem::Jia);
        assert_eq!(c.span_index, 2);
        assert_eq!(c.day_in_span, 16);
    }

    #[test]
    fn day_stem_does_not_induce() {
        let terms = ctx(SolarTerm::LiChun, "2024-02-04 00:00:00");
        let t = parse_civil("2024-02-05 00:00:00").unwrap();
        let p = pillars_of(["甲辰", "丙寅", "戊午", "甲寅"]);
        let c = month_command(t, &terms, &p, &mut Tracer::new());
        assert_eq!(c.stem, Stem::Wu);
        assert!(!c.true_qi_induced);
    }
}
