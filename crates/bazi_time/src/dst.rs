//! Historical daylight-saving windows (China, 1986–1991).
//!
//! Each window is a closed interval of wall-clock timestamps, from 00:00:00
//! on the first day to 23:59:59 on the last. Clocks inside a window ran one
//! hour ahead of standard time.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::TimeError;

/// Length of the daylight-saving shift in seconds.
pub const DST_OFFSET_SECONDS: i64 = 3600;

/// First and last civil day of each window as (year, month, day).
const CHINA_DST_DAYS: [((i32, u32, u32), (i32, u32, u32)); 6] = [
    ((1986, 5, 4), (1986, 9, 14)),
    ((1987, 4, 12), (1987, 9, 13)),
    ((1988, 4, 10), (1988, 9, 11)),
    ((1989, 4, 16), (1989, 9, 17)),
    ((1990, 4, 15), (1990, 9, 16)),
    ((1991, 4, 14), (1991, 9, 15)),
];

/// One closed daylight-saving interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DstWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DstWindow {
    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        self.start <= *t && *t <= self.end
    }
}

/// The daylight-saving windows in chronological order.
pub fn china_dst_windows() -> Vec<DstWindow> {
    CHINA_DST_DAYS
        .iter()
        .filter_map(|&((y0, m0, d0), (y1, m1, d1))| {
            let start = NaiveDate::from_ymd_opt(y0, m0, d0)?.and_hms_opt(0, 0, 0)?;
            let end = NaiveDate::from_ymd_opt(y1, m1, d1)?.and_hms_opt(23, 59, 59)?;
            Some(DstWindow { start, end })
        })
        .collect()
}

/// Outcome of a daylight-saving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DstCorrection {
    /// Timestamp with the shift removed (unchanged outside every window).
    pub corrected: NaiveDateTime,
    /// Window that matched, if any.
    pub window: Option<DstWindow>,
}

impl DstCorrection {
    pub fn applied(&self) -> bool {
        self.window.is_some()
    }
}

/// Subtract one hour when `t` lies inside a daylight-saving window.
pub fn correct_dst(t: NaiveDateTime) -> Result<DstCorrection, TimeError> {
    let window = china_dst_windows().into_iter().find(|w| w.contains(&t));
    let corrected = match window {
        Some(_) => t
            .checked_sub_signed(chrono::Duration::seconds(DST_OFFSET_SECONDS))
            .ok_or(TimeError::OutOfRange)?,
        None => t,
    };
    if let Some(w) = &window {
        tracing::debug!(start = %w.start, end = %w.end, "daylight-saving window matched");
    }
    Ok(DstCorrection { corrected, window })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::parse_civil;

    #[test]
    fn six_windows() {
        assert_eq!(china_dst_windows().len(), 6);
    }

    #[test]
    fn inside_window_shifts_one_hour() {
        let t = parse_civil("1988-07-01 12:00:00").unwrap();
        let c = correct_dst(t).unwrap();
        assert!(c.applied());
        assert_eq!(c.corrected, parse_civil("1988-07-01 11:00:00").unwrap());
    }

    #[test]
    fn window_edges_are_inclusive() {
        let first = parse_civil("1986-05-04 00:00:00").unwrap();
        let last = parse_civil("1991-09-15 23:59:59").unwrap();
        assert!(correct_dst(first).unwrap().applied());
        assert!(correct_dst(last).unwrap().applied());
        assert_eq!(
            correct_dst(first).unwrap().corrected,
            parse_civil("1986-05-03 23:00:00").unwrap()
        );
    }

    #[test]
    fn outside_windows_unchanged() {
        for lit in ["1986-05-03 23:59:59", "1991-09-16 00:00:00", "1992-07-01 12:00:00"] {
            let t = parse_civil(lit).unwrap();
            let c = correct_dst(t).unwrap();
            assert!(!c.applied(), "{lit}");
            assert_eq!(c.corrected, t);
        }
    }
}
