use chrono::NaiveDateTime;
use serde::Serialize;

/// One calendar cell of an availability query. Never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Slot {
    pub time: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_available: bool,
    pub is_peak_hour: bool,
    pub price: f64,
}
