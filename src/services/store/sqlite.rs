use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::{Connection, TransactionBehavior};

use super::{BookingStore, CourtCatalog};
use crate::db::queries;
use crate::errors::StoreError;
use crate::models::{Booking, BookingStatus, Court, CourtStatus, TimeInterval};

pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl BookingStore for SqliteStore {
    fn find_overlapping_confirmed(&self, interval: &TimeInterval) -> Result<Vec<Booking>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::find_overlapping_confirmed(&conn, interval)?)
    }

    fn insert_confirmed(&self, booking: &Booking) -> Result<Booking, StoreError> {
        let mut conn = self.conn()?;
        // IMMEDIATE takes the write lock up front so another process cannot
        // slip an insert between our check and our write.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let overlapping = queries::find_overlapping_confirmed(&tx, &booking.interval)?;
        if !overlapping.is_empty() {
            return Err(StoreError::Conflict);
        }

        queries::create_booking(&tx, booking)?;
        tx.commit()?;
        Ok(booking.clone())
    }

    fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        at: NaiveDateTime,
    ) -> Result<Booking, StoreError> {
        let conn = self.conn()?;
        if !queries::update_booking_status(&conn, id, status, &at)? {
            return Err(StoreError::NotFound);
        }
        queries::get_booking_by_id(&conn, id)?.ok_or(StoreError::NotFound)
    }

    fn get_booking(&self, id: &str) -> Result<Option<Booking>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::get_booking_by_id(&conn, id)?)
    }

    fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::get_bookings_for_user(&conn, user_id)?)
    }

    fn list_bookings(&self, status: Option<BookingStatus>, limit: i64) -> Result<Vec<Booking>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::get_all_bookings(&conn, status, limit)?)
    }

    fn complete_ended(&self, now: NaiveDateTime) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        Ok(queries::complete_ended_bookings(&conn, &now)?)
    }
}

impl CourtCatalog for SqliteStore {
    fn get_court(&self, id: &str) -> Result<Option<Court>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::get_court(&conn, id)?)
    }

    fn list_courts(&self) -> Result<Vec<Court>, StoreError> {
        let conn = self.conn()?;
        Ok(queries::list_courts(&conn)?)
    }

    fn insert_court(&self, court: &Court) -> Result<(), StoreError> {
        let conn = self.conn()?;
        Ok(queries::create_court(&conn, court)?)
    }

    fn set_court_status(
        &self,
        id: &str,
        status: CourtStatus,
        at: NaiveDateTime,
    ) -> Result<Court, StoreError> {
        let conn = self.conn()?;
        if !queries::update_court_status(&conn, id, status, &at)? {
            return Err(StoreError::NotFound);
        }
        queries::get_court(&conn, id)?.ok_or(StoreError::NotFound)
    }
}
