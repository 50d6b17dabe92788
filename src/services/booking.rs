use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};

use crate::errors::BookingError;
use crate::models::{Booking, BookingStatus, Court, PaymentStatus, Slot, TimeInterval, UserDashboard};
use crate::services::availability;
use crate::services::clock::Clock;
use crate::services::locks::CourtLocks;
use crate::services::pricing;
use crate::services::slots::SlotGrid;
use crate::services::store::{BookingStore, CourtCatalog};

/// Who is asking. Identity itself is established upstream.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: String,
    pub is_admin: bool,
}

impl Requester {
    pub fn may_manage(&self, booking: &Booking) -> bool {
        self.is_admin || self.user_id == booking.user_id
    }
}

/// Admission control for court bookings.
///
/// Every path that can change which bookings are CONFIRMED on a court goes
/// through that court's lock, and the store's insert re-checks for overlap
/// inside its own transaction. The lock bounds how long a caller waits; the
/// store keeps the invariant even across processes.
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    courts: Arc<dyn CourtCatalog>,
    clock: Arc<dyn Clock>,
    grid: SlotGrid,
    locks: CourtLocks,
    lock_timeout: Duration,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        courts: Arc<dyn CourtCatalog>,
        clock: Arc<dyn Clock>,
        grid: SlotGrid,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            store,
            courts,
            clock,
            grid,
            locks: CourtLocks::new(),
            lock_timeout,
        }
    }

    pub fn locks(&self) -> &CourtLocks {
        &self.locks
    }

    /// Current time at the precision the store keeps.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now().trunc_subsecs(0)
    }

    fn court(&self, court_id: &str) -> Result<Court, BookingError> {
        self.courts
            .get_court(court_id)?
            .ok_or_else(|| BookingError::CourtNotFound(court_id.to_string()))
    }

    pub async fn check_and_create_booking(
        &self,
        court_id: &str,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        let interval = TimeInterval::new(court_id, start, end).ok_or(BookingError::InvalidTimeRange)?;

        let now = self.now();
        if interval.start() < now {
            return Err(BookingError::InvalidTime);
        }

        let court = self.court(court_id)?;
        if !court.status.accepts_bookings() {
            return Err(BookingError::CourtUnavailable(court.id));
        }
        if !self.grid.within_operating_hours(&interval) {
            return Err(BookingError::OutsideOperatingHours);
        }

        let _guard = self.locks.acquire(court_id, self.lock_timeout).await?;

        let overlapping = self.store.find_overlapping_confirmed(&interval)?;
        if let Some(existing) = overlapping.first() {
            tracing::info!(
                court_id,
                user_id,
                existing_booking = %existing.id,
                start = %interval.start(),
                end = %interval.end(),
                "booking rejected: slot unavailable"
            );
            return Err(BookingError::SlotUnavailable);
        }

        let quote = pricing::quote(&court, &interval, &self.grid);
        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            interval,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            total_amount: quote.amount,
            created_at: now,
            updated_at: now,
        };

        let booking = self.store.insert_confirmed(&booking)?;
        tracing::info!(
            booking_id = %booking.id,
            court_id,
            user_id,
            amount = booking.total_amount,
            peak = quote.is_peak_hour,
            "booking confirmed"
        );
        Ok(booking)
    }

    pub async fn cancel_booking(
        &self,
        booking_id: &str,
        requester: &Requester,
    ) -> Result<Booking, BookingError> {
        let booking = self.load_for(booking_id, requester)?;

        let _guard = self.locks.acquire(booking.court_id(), self.lock_timeout).await?;

        // Re-read under the lock; a concurrent cancel may have won.
        let booking = self.load_for(booking_id, requester)?;
        match booking.status {
            BookingStatus::Cancelled => return Err(BookingError::AlreadyCancelled),
            status if !status.can_transition_to(BookingStatus::Cancelled) => {
                return Err(BookingError::InvalidStatusTransition(status));
            }
            _ => {}
        }

        let cancelled = self
            .store
            .update_status(booking_id, BookingStatus::Cancelled, self.now())?;
        tracing::info!(
            booking_id,
            court_id = cancelled.court_id(),
            user_id = %requester.user_id,
            admin = requester.is_admin,
            "booking cancelled"
        );
        Ok(cancelled)
    }

    /// Reads without locking, so the result is advisory.
    pub fn get_availability(&self, court_id: &str, date: NaiveDate) -> Result<Vec<Slot>, BookingError> {
        let court = self.court(court_id)?;
        let bookings = self
            .store
            .find_overlapping_confirmed(&TimeInterval::day(court_id, date))?;
        Ok(availability::resolve(&court, date, &self.grid, &bookings))
    }

    pub fn get_booking(&self, booking_id: &str, requester: &Requester) -> Result<Booking, BookingError> {
        self.load_for(booking_id, requester)
    }

    pub fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.bookings_for_user(user_id)?)
    }

    pub fn list_bookings(&self, status: Option<BookingStatus>, limit: i64) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.list_bookings(status, limit)?)
    }

    pub fn dashboard(&self, user_id: &str) -> Result<UserDashboard, BookingError> {
        let bookings = self.store.bookings_for_user(user_id)?;
        Ok(UserDashboard::from_bookings(&bookings, self.now()))
    }

    pub fn complete_finished_bookings(&self) -> Result<usize, BookingError> {
        let count = self.store.complete_ended(self.now())?;
        if count > 0 {
            tracing::info!(count, "marked finished bookings completed");
        }
        Ok(count)
    }

    fn load_for(&self, booking_id: &str, requester: &Requester) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get_booking(booking_id)?
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))?;
        if !requester.may_manage(&booking) {
            tracing::warn!(booking_id, user_id = %requester.user_id, "booking access denied");
            return Err(BookingError::Forbidden);
        }
        Ok(booking)
    }
}
