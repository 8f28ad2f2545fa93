//! Month-command sub-periods (人元司令分野).
//!
//! A governing month is split into consecutive sub-periods, each commanded by
//! one stem for a fixed number of days. Every branch's days sum to 30.

use crate::branch::Branch;
use crate::stem::Stem;

/// Nominal month length the sub-periods are laid out over.
pub const COMMAND_MONTH_DAYS: u8 = 30;

/// One sub-period: commanding stem and its length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpan {
    pub stem: Stem,
    pub days: u8,
}

const fn span(stem: Stem, days: u8) -> CommandSpan {
    CommandSpan { stem, days }
}

/// Ordered sub-periods of a month branch.
pub const fn command_spans(month_branch: Branch) -> &'static [CommandSpan] {
    match month_branch {
        Branch::Yin => const { &[span(Stem::Wu, 7), span(Stem::Bing, 7), span(Stem::Jia, 16)] },
        Branch::Mao => const { &[span(Stem::Jia, 10), span(Stem::Yi, 20)] },
        Branch::Chen => const { &[span(Stem::Yi, 9), span(Stem::Gui, 3), span(Stem::Wu, 18)] },
        Branch::Si => const { &[span(Stem::Wu, 5), span(Stem::Geng, 9), span(Stem::Bing, 16)] },
        Branch::Wu => const { &[span(Stem::Bing, 10), span(Stem::Ji, 9), span(Stem::Ding, 11)] },
        Branch::Wei => const { &[span(Stem::Ding, 9), span(Stem::Yi, 3), span(Stem::Ji, 18)] },
        Branch::Shen => const { &[span(Stem::Ji, 7), span(Stem::Ren, 3), span(Stem::Geng, 20)] },
        Branch::You => const { &[span(Stem::Geng, 10), span(Stem::Xin, 20)] },
        Branch::Xu => const { &[span(Stem::Xin, 9), span(Stem::Ding, 3), span(Stem::Wu, 18)] },
        Branch::Hai => const { &[span(Stem::Wu, 7), span(Stem::Jia, 5), span(Stem::Ren, 18)] },
        Branch::Zi => const { &[span(Stem::Ren, 10), span(Stem::Gui, 20)] },
        Branch::Chou => const { &[span(Stem::Gui, 9), span(Stem::Xin, 3), span(Stem::Ji, 18)] },
    }
}

/// Result of locating an elapsed day count within a month's sub-periods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandLookup {
    pub stem: Stem,
    /// 0-based index of the sub-period.
    pub span_index: usize,
    /// True when elapsed ran past the table and the last stem was used.
    pub overflowed: bool,
}

/// Commanding stem after `elapsed_days` into the month.
///
/// Walks the spans accumulating days; the first span whose cumulative total
/// reaches `elapsed_days` commands. Past the end, the last span commands.
pub fn commanding_stem(month_branch: Branch, elapsed_days: f64) -> CommandLookup {
    let spans = command_spans(month_branch);
    let mut cumulative = 0.0;
    for (i, s) in spans.iter().enumerate() {
        cumulative += f64::from(s.days);
        if elapsed_days <= cumulative {
            return CommandLookup {
                stem: s.stem,
                span_index: i,
                overflowed: false,
            };
        }
    }
    let last = spans.len() - 1;
    CommandLookup {
        stem: spans[last].stem,
        span_index: last,
        overflowed: true,
    }
}
