use chrono::{Duration, NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;

/// A half-open time range `[start, end)` on a single court.
///
/// Construction guarantees `start < end`, so every interval has a positive
/// duration. Two intervals that merely touch (`a.end == b.start`) do not
/// overlap, which is what makes back-to-back bookings legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    court_id: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    /// Endpoints are truncated to whole seconds, the precision bookings are
    /// stored at. Returns `None` when the truncated `start >= end`.
    pub fn new(court_id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        if start >= end {
            return None;
        }
        Some(Self {
            court_id: court_id.into(),
            start,
            end,
        })
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)`.
    pub fn day(court_id: impl Into<String>, date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        Self {
            court_id: court_id.into(),
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn court_id(&self) -> &str {
        &self.court_id
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Intervals on different courts never overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.court_id == other.court_id && self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, point: NaiveDateTime) -> bool {
        self.start <= point && point < self.end
    }
}
