use chrono::NaiveDateTime;
use serde::Serialize;

use super::{Booking, BookingStatus};

#[derive(Debug, Clone, Serialize)]
pub struct UserDashboard {
    pub upcoming_count: i64,
    pub completed_count: i64,
    pub cancelled_count: i64,
    pub total_spent: f64,
    pub next_booking: Option<Booking>,
}

impl UserDashboard {
    pub fn from_bookings(bookings: &[Booking], now: NaiveDateTime) -> Self {
        let mut dashboard = UserDashboard {
            upcoming_count: 0,
            completed_count: 0,
            cancelled_count: 0,
            total_spent: 0.0,
            next_booking: None,
        };

        for booking in bookings {
            match booking.status {
                BookingStatus::Confirmed if booking.interval.start() > now => {
                    dashboard.upcoming_count += 1;
                    let sooner = dashboard
                        .next_booking
                        .as_ref()
                        .map(|next| booking.interval.start() < next.interval.start())
                        .unwrap_or(true);
                    if sooner {
                        dashboard.next_booking = Some(booking.clone());
                    }
                }
                BookingStatus::Completed => dashboard.completed_count += 1,
                BookingStatus::Cancelled => dashboard.cancelled_count += 1,
                BookingStatus::Confirmed | BookingStatus::Pending => {}
            }
            if booking.status != BookingStatus::Cancelled {
                dashboard.total_spent += booking.total_amount;
            }
        }

        dashboard
    }
}
