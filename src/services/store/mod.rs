pub mod memory;
pub mod sqlite;

use chrono::NaiveDateTime;

use crate::errors::StoreError;
use crate::models::{Booking, BookingStatus, Court, CourtStatus, TimeInterval};

/// Durable record of bookings.
pub trait BookingStore: Send + Sync {
    /// CONFIRMED bookings on `interval`'s court that overlap it.
    fn find_overlapping_confirmed(&self, interval: &TimeInterval) -> Result<Vec<Booking>, StoreError>;

    /// Atomically re-checks for overlap and inserts. Returns
    /// `StoreError::Conflict` instead of inserting when any CONFIRMED
    /// booking on the same court overlaps.
    fn insert_confirmed(&self, booking: &Booking) -> Result<Booking, StoreError>;

    fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        at: NaiveDateTime,
    ) -> Result<Booking, StoreError>;

    fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError>;

    fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError>;

    fn list_bookings(&self, status: Option<BookingStatus>, limit: i64) -> Result<Vec<Booking>, StoreError>;

    /// Moves CONFIRMED bookings that ended at or before `now` to COMPLETED.
    fn complete_ended(&self, now: NaiveDateTime) -> Result<usize, StoreError>;
}

pub trait CourtCatalog: Send + Sync {
    fn get_court(&self, id: &str) -> Result<Option<Court>, StoreError>;

    fn list_courts(&self) -> Result<Vec<Court>, StoreError>;

    fn insert_court(&self, court: &Court) -> Result<(), StoreError>;

    fn set_court_status(
        &self,
        id: &str,
        status: CourtStatus,
        at: NaiveDateTime,
    ) -> Result<Court, StoreError>;
}
