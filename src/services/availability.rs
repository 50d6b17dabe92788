use chrono::NaiveDate;

use crate::models::{Booking, Court, Slot};
use crate::services::pricing;
use crate::services::slots::SlotGrid;

/// Marks each grid slot for `date` free or taken against a snapshot of the
/// court's bookings. The snapshot may be stale; admission re-checks at
/// booking time.
pub fn resolve(court: &Court, date: NaiveDate, grid: &SlotGrid, bookings: &[Booking]) -> Vec<Slot> {
    let open = court.status.accepts_bookings();

    grid.generate(&court.id, date)
        .into_iter()
        .map(|candidate| {
            let taken = bookings.iter().any(|b| b.blocks(&candidate.interval));
            let quote = pricing::quote(court, &candidate.interval, grid);
            Slot {
                time: candidate.interval.start().format("%H:%M").to_string(),
                start: candidate.interval.start(),
                end: candidate.interval.end(),
                is_available: open && !taken,
                is_peak_hour: candidate.is_peak_hour,
                price: quote.amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, CourtStatus, PaymentStatus, TimeInterval};
    use crate::services::slots::parse_peak_windows;
    use chrono::{Duration, NaiveDateTime, NaiveTime};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    fn grid() -> SlotGrid {
        SlotGrid::new(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            Duration::minutes(60),
            parse_peak_windows("17:00-19:00,20:00-22:00").unwrap(),
        )
        .unwrap()
    }

    fn court(status: CourtStatus) -> Court {
        let now = dt("2025-06-01 08:00");
        Court {
            id: "c1".to_string(),
            name: "Court 1".to_string(),
            is_indoor: false,
            hourly_rate: 25.0,
            peak_hour_rate: 40.0,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn booking(start: &str, end: &str, status: BookingStatus) -> Booking {
        let now = dt("2025-06-01 08:00");
        Booking {
            id: format!("b-{start}"),
            user_id: "u1".to_string(),
            interval: TimeInterval::new("c1", dt(start), dt(end)).unwrap(),
            status,
            payment_status: PaymentStatus::Pending,
            total_amount: 25.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_single_booking_blocks_one_slot() {
        let bookings = vec![booking("2025-06-16 14:00", "2025-06-16 15:00", BookingStatus::Confirmed)];
        let slots = resolve(&court(CourtStatus::Available), date(), &grid(), &bookings);

        assert_eq!(slots.len(), 16);
        let taken: Vec<&str> = slots
            .iter()
            .filter(|s| !s.is_available)
            .map(|s| s.time.as_str())
            .collect();
        assert_eq!(taken, vec!["14:00"]);
    }

    #[test]
    fn test_straddling_booking_blocks_both_slots() {
        let bookings = vec![booking("2025-06-16 14:30", "2025-06-16 15:30", BookingStatus::Confirmed)];
        let slots = resolve(&court(CourtStatus::Available), date(), &grid(), &bookings);
        let taken: Vec<&str> = slots
            .iter()
            .filter(|s| !s.is_available)
            .map(|s| s.time.as_str())
            .collect();
        assert_eq!(taken, vec!["14:00", "15:00"]);
    }

    #[test]
    fn test_cancelled_and_completed_bookings_do_not_block() {
        let bookings = vec![
            booking("2025-06-16 10:00", "2025-06-16 11:00", BookingStatus::Cancelled),
            booking("2025-06-16 12:00", "2025-06-16 13:00", BookingStatus::Completed),
        ];
        let slots = resolve(&court(CourtStatus::Available), date(), &grid(), &bookings);
        assert!(slots.iter().all(|s| s.is_available));
    }

    #[test]
    fn test_prices_follow_peak_windows() {
        let slots = resolve(&court(CourtStatus::Available), date(), &grid(), &[]);
        let ten = slots.iter().find(|s| s.time == "10:00").unwrap();
        let six_pm = slots.iter().find(|s| s.time == "18:00").unwrap();
        assert_eq!(ten.price, 25.0);
        assert!(!ten.is_peak_hour);
        assert_eq!(six_pm.price, 40.0);
        assert!(six_pm.is_peak_hour);
    }

    #[test]
    fn test_maintenance_court_has_no_free_slots() {
        let slots = resolve(&court(CourtStatus::Maintenance), date(), &grid(), &[]);
        assert_eq!(slots.len(), 16);
        assert!(slots.iter().all(|s| !s.is_available));
    }
}
