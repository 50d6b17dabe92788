use serde::Serialize;

use crate::models::{Court, TimeInterval};
use crate::services::slots::SlotGrid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub billed_hours: i64,
    pub rate: f64,
    pub is_peak_hour: bool,
    pub amount: f64,
}

/// Partial hours are billed as whole hours.
pub fn billed_hours(interval: &TimeInterval) -> i64 {
    let seconds = interval.duration().num_seconds();
    (seconds + 3599) / 3600
}

/// The whole interval is charged at the rate in force at its start time,
/// even if it runs into or out of a peak window.
pub fn quote(court: &Court, interval: &TimeInterval, grid: &SlotGrid) -> Quote {
    let is_peak_hour = grid.is_peak(interval.start().time());
    let rate = if is_peak_hour {
        court.peak_hour_rate
    } else {
        court.hourly_rate
    };
    let hours = billed_hours(interval);

    Quote {
        billed_hours: hours,
        rate,
        is_peak_hour,
        amount: hours as f64 * rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourtStatus;
    use crate::services::slots::parse_peak_windows;
    use chrono::{Duration, NaiveDateTime, NaiveTime};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn grid() -> SlotGrid {
        SlotGrid::new(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            Duration::minutes(60),
            parse_peak_windows("17:00-19:00").unwrap(),
        )
        .unwrap()
    }

    fn court() -> Court {
        let now = dt("2025-06-01 08:00");
        Court {
            id: "c1".to_string(),
            name: "Centre Court".to_string(),
            is_indoor: true,
            hourly_rate: 25.0,
            peak_hour_rate: 40.0,
            status: CourtStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    fn iv(start: &str, end: &str) -> TimeInterval {
        TimeInterval::new("c1", dt(start), dt(end)).unwrap()
    }

    #[test]
    fn test_one_off_peak_hour() {
        let q = quote(&court(), &iv("2025-06-16 10:00", "2025-06-16 11:00"), &grid());
        assert_eq!(q.billed_hours, 1);
        assert!(!q.is_peak_hour);
        assert_eq!(q.amount, 25.0);
    }

    #[test]
    fn test_partial_hours_round_up() {
        assert_eq!(billed_hours(&iv("2025-06-16 10:00", "2025-06-16 10:30")), 1);
        assert_eq!(billed_hours(&iv("2025-06-16 10:00", "2025-06-16 11:30")), 2);
        assert_eq!(billed_hours(&iv("2025-06-16 10:00", "2025-06-16 12:00")), 2);
        let q = quote(&court(), &iv("2025-06-16 10:00", "2025-06-16 11:30"), &grid());
        assert_eq!(q.amount, 50.0);
    }

    #[test]
    fn test_peak_start_uses_peak_rate() {
        let q = quote(&court(), &iv("2025-06-16 17:00", "2025-06-16 19:00"), &grid());
        assert!(q.is_peak_hour);
        assert_eq!(q.amount, 80.0);
    }

    #[test]
    fn test_mixed_interval_priced_by_start_time() {
        // Starts off-peak, runs into peak.
        let q = quote(&court(), &iv("2025-06-16 16:00", "2025-06-16 18:00"), &grid());
        assert_eq!(q.rate, 25.0);
        assert_eq!(q.amount, 50.0);

        // Starts in peak, runs out of it.
        let q = quote(&court(), &iv("2025-06-16 18:00", "2025-06-16 20:00"), &grid());
        assert_eq!(q.rate, 40.0);
        assert_eq!(q.amount, 80.0);
    }
}
