use crate::models::{Booking, Court};

pub fn generate_ics(booking: &Booking, court: &Court) -> String {
    let dtstart = booking.interval.start().format("%Y%m%dT%H%M%S").to_string();
    let dtend = booking.interval.end().format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = booking.created_at.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@courtbook", booking.id);

    let summary = format!("Court booking: {}", court.name);
    let location = if court.is_indoor { "Indoor" } else { "Outdoor" };
    let description = format!(
        "Status: {}\\nAmount: {:.2}",
        booking.status.as_str(),
        booking.total_amount
    );

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Courtbook//Court Reservations//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         LOCATION:{location}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}
