use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Booking, BookingStatus, Court, CourtStatus, PaymentStatus, TimeInterval};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, court_id, user_id, start_time, end_time, status, payment_status, total_amount, created_at, updated_at";

const COURT_COLUMNS: &str = "id, name, is_indoor, hourly_rate, peak_hour_rate, status, created_at, updated_at";

fn ts(dt: &NaiveDateTime) -> String {
    dt.format(TS_FORMAT).to_string()
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn parse_ts(idx: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .map_err(|e| conversion_error(idx, format!("bad timestamp {s:?}: {e}")))
}

// ── Courts ──

pub fn create_court(conn: &Connection, court: &Court) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO courts (id, name, is_indoor, hourly_rate, peak_hour_rate, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            court.id,
            court.name,
            court.is_indoor,
            court.hourly_rate,
            court.peak_hour_rate,
            court.status.as_str(),
            ts(&court.created_at),
            ts(&court.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_court(conn: &Connection, id: &str) -> rusqlite::Result<Option<Court>> {
    conn.query_row(
        &format!("SELECT {COURT_COLUMNS} FROM courts WHERE id = ?1"),
        params![id],
        parse_court_row,
    )
    .optional()
}

pub fn list_courts(conn: &Connection) -> rusqlite::Result<Vec<Court>> {
    let mut stmt = conn.prepare(&format!("SELECT {COURT_COLUMNS} FROM courts ORDER BY name ASC"))?;
    let rows = stmt.query_map([], parse_court_row)?;
    rows.collect()
}

pub fn update_court_status(
    conn: &Connection,
    id: &str,
    status: CourtStatus,
    at: &NaiveDateTime,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE courts SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), ts(at), id],
    )?;
    Ok(count > 0)
}

fn parse_court_row(row: &rusqlite::Row) -> rusqlite::Result<Court> {
    let status_str: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Court {
        id: row.get(0)?,
        name: row.get(1)?,
        is_indoor: row.get(2)?,
        hourly_rate: row.get(3)?,
        peak_hour_rate: row.get(4)?,
        status: CourtStatus::parse(&status_str)
            .ok_or_else(|| conversion_error(5, format!("unknown court status {status_str:?}")))?,
        created_at: parse_ts(6, &created_at)?,
        updated_at: parse_ts(7, &updated_at)?,
    })
}

// ── Bookings ──

pub fn find_overlapping_confirmed(
    conn: &Connection,
    interval: &TimeInterval,
) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE court_id = ?1 AND status = 'CONFIRMED' AND start_time < ?3 AND ?2 < end_time
         ORDER BY start_time ASC"
    ))?;

    let rows = stmt.query_map(
        params![interval.court_id(), ts(&interval.start()), ts(&interval.end())],
        parse_booking_row,
    )?;
    rows.collect()
}

pub fn create_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, court_id, user_id, start_time, end_time, status, payment_status, total_amount, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.id,
            booking.court_id(),
            booking.user_id,
            ts(&booking.interval.start()),
            ts(&booking.interval.end()),
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.total_amount,
            ts(&booking.created_at),
            ts(&booking.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    )
    .optional()
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
    at: &NaiveDateTime,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), ts(at), id],
    )?;
    Ok(count > 0)
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY start_time DESC"
    ))?;
    let rows = stmt.query_map(params![user_id], parse_booking_row)?;
    rows.collect()
}

pub fn get_all_bookings(
    conn: &Connection,
    status: Option<BookingStatus>,
    limit: i64,
) -> rusqlite::Result<Vec<Booking>> {
    match status {
        Some(status) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1 ORDER BY start_time DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![status.as_str(), limit], parse_booking_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY start_time DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], parse_booking_row)?;
            rows.collect()
        }
    }
}

pub fn complete_ended_bookings(conn: &Connection, now: &NaiveDateTime) -> rusqlite::Result<usize> {
    let now = ts(now);
    conn.execute(
        "UPDATE bookings SET status = 'COMPLETED', updated_at = ?1
         WHERE status = 'CONFIRMED' AND end_time <= ?1",
        params![now],
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let court_id: String = row.get(1)?;
    let start = parse_ts(3, &row.get::<_, String>(3)?)?;
    let end = parse_ts(4, &row.get::<_, String>(4)?)?;
    let status_str: String = row.get(5)?;
    let payment_str: String = row.get(6)?;

    let interval = TimeInterval::new(court_id, start, end)
        .ok_or_else(|| conversion_error(4, format!("booking ends before it starts: {start} >= {end}")))?;

    Ok(Booking {
        id: row.get(0)?,
        user_id: row.get(2)?,
        interval,
        status: BookingStatus::parse(&status_str)
            .ok_or_else(|| conversion_error(5, format!("unknown booking status {status_str:?}")))?,
        payment_status: PaymentStatus::parse(&payment_str)
            .ok_or_else(|| conversion_error(6, format!("unknown payment status {payment_str:?}")))?,
        total_amount: row.get(7)?,
        created_at: parse_ts(8, &row.get::<_, String>(8)?)?,
        updated_at: parse_ts(9, &row.get::<_, String>(9)?)?,
    })
}
