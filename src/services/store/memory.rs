use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;

use super::{BookingStore, CourtCatalog};
use crate::errors::StoreError;
use crate::models::{Booking, BookingStatus, Court, CourtStatus, TimeInterval};

#[derive(Default)]
struct Inner {
    courts: HashMap<String, Court>,
    bookings: Vec<Booking>,
}

/// Mutex-backed store with the same atomicity as the SQLite one, for tests
/// and throwaway runs.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl BookingStore for InMemoryStore {
    fn find_overlapping_confirmed(&self, interval: &TimeInterval) -> Result<Vec<Booking>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.blocks(interval))
            .cloned()
            .collect())
    }

    fn insert_confirmed(&self, booking: &Booking) -> Result<Booking, StoreError> {
        let mut inner = self.lock()?;
        if inner.bookings.iter().any(|b| b.blocks(&booking.interval)) {
            return Err(StoreError::Conflict);
        }
        inner.bookings.push(booking.clone());
        Ok(booking.clone())
    }

    fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        at: NaiveDateTime,
    ) -> Result<Booking, StoreError> {
        let mut inner = self.lock()?;
        let booking = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        booking.status = status;
        booking.updated_at = at;
        Ok(booking.clone())
    }

    fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.bookings.iter().find(|b| b.id == id).cloned())
    }

    fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        let inner = self.lock()?;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.interval.start().cmp(&a.interval.start()));
        Ok(bookings)
    }

    fn list_bookings(&self, status: Option<BookingStatus>, limit: i64) -> Result<Vec<Booking>, StoreError> {
        let inner = self.lock()?;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| status.map(|s| b.status == s).unwrap_or(true))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.interval.start().cmp(&a.interval.start()));
        bookings.truncate(limit.max(0) as usize);
        Ok(bookings)
    }

    fn complete_ended(&self, now: NaiveDateTime) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let mut count = 0;
        for booking in inner.bookings.iter_mut() {
            if booking.status == BookingStatus::Confirmed && booking.interval.end() <= now {
                booking.status = BookingStatus::Completed;
                booking.updated_at = now;
                count += 1;
            }
        }
        Ok(count)
    }
}

impl CourtCatalog for InMemoryStore {
    fn get_court(&self, id: &str) -> Result<Option<Court>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.courts.get(id).cloned())
    }

    fn list_courts(&self) -> Result<Vec<Court>, StoreError> {
        let inner = self.lock()?;
        let mut courts: Vec<Court> = inner.courts.values().cloned().collect();
        courts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(courts)
    }

    fn insert_court(&self, court: &Court) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.courts.insert(court.id.clone(), court.clone());
        Ok(())
    }

    fn set_court_status(
        &self,
        id: &str,
        status: CourtStatus,
        at: NaiveDateTime,
    ) -> Result<Court, StoreError> {
        let mut inner = self.lock()?;
        let court = inner.courts.get_mut(id).ok_or(StoreError::NotFound)?;
        court.status = status;
        court.updated_at = at;
        Ok(court.clone())
    }
}
