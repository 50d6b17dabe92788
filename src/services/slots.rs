use chrono::{Duration, NaiveDate, NaiveTime};

use crate::config::AppConfig;
use crate::models::TimeInterval;

/// A daily sub-window `[from, to)` billed at the peak rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakWindow {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl PeakWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.from <= time && time < self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSlot {
    pub interval: TimeInterval,
    pub is_peak_hour: bool,
}

/// The facility's fixed daily schedule: operating window, slot length and
/// peak windows. Holds no per-call state, so generation is a pure function
/// of `(court, date)`.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    granularity: Duration,
    peak_windows: Vec<PeakWindow>,
}

impl SlotGrid {
    pub fn new(
        opens_at: NaiveTime,
        closes_at: NaiveTime,
        granularity: Duration,
        peak_windows: Vec<PeakWindow>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            opens_at < closes_at,
            "opening time {opens_at} must be before closing time {closes_at}"
        );
        anyhow::ensure!(granularity > Duration::zero(), "slot length must be positive");
        for window in &peak_windows {
            anyhow::ensure!(
                window.from < window.to,
                "peak window {}-{} is empty",
                window.from.format("%H:%M"),
                window.to.format("%H:%M")
            );
        }
        Ok(Self {
            opens_at,
            closes_at,
            granularity,
            peak_windows,
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            parse_time(&config.open_time)?,
            parse_time(&config.close_time)?,
            Duration::minutes(config.slot_minutes as i64),
            parse_peak_windows(&config.peak_windows)?,
        )
    }

    pub fn is_peak(&self, time: NaiveTime) -> bool {
        self.peak_windows.iter().any(|w| w.contains(time))
    }

    /// Whether the interval fits inside a single day's operating window.
    pub fn within_operating_hours(&self, interval: &TimeInterval) -> bool {
        let (start, end) = (interval.start(), interval.end());
        start.date() == end.date() && start.time() >= self.opens_at && end.time() <= self.closes_at
    }

    /// Ordered candidate slots for one court on one date. A trailing partial
    /// slot that would run past closing time is dropped.
    pub fn generate(&self, court_id: &str, date: NaiveDate) -> Vec<GridSlot> {
        let close = date.and_time(self.closes_at);
        let mut cursor = date.and_time(self.opens_at);
        let mut slots = vec![];

        while cursor + self.granularity <= close {
            let end = cursor + self.granularity;
            if let Some(interval) = TimeInterval::new(court_id, cursor, end) {
                slots.push(GridSlot {
                    is_peak_hour: self.is_peak(cursor.time()),
                    interval,
                });
            }
            cursor = end;
        }

        slots
    }
}

fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    let s = s.trim();
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("invalid time format: {s}"));
    }
    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid hour in: {s}"))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid minute in: {s}"))?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| anyhow::anyhow!("time out of range: {s}"))
}

/// Parses `"17:00-19:00,20:00-22:00"`. An empty string means no peak hours.
pub fn parse_peak_windows(s: &str) -> anyhow::Result<Vec<PeakWindow>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (from, to) = part
                .split_once('-')
                .ok_or_else(|| anyhow::anyhow!("invalid peak window: {part}"))?;
            Ok(PeakWindow {
                from: parse_time(from)?,
                to: parse_time(to)?,
            })
        })
        .collect()
}
