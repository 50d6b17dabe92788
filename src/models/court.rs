use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Court {
    pub id: String,
    pub name: String,
    pub is_indoor: bool,
    pub hourly_rate: f64,
    pub peak_hour_rate: f64,
    pub status: CourtStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourtStatus {
    Available,
    Occupied,
    Maintenance,
    Closed,
}

impl CourtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtStatus::Available => "AVAILABLE",
            CourtStatus::Occupied => "OCCUPIED",
            CourtStatus::Maintenance => "MAINTENANCE",
            CourtStatus::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AVAILABLE" => Some(CourtStatus::Available),
            "OCCUPIED" => Some(CourtStatus::Occupied),
            "MAINTENANCE" => Some(CourtStatus::Maintenance),
            "CLOSED" => Some(CourtStatus::Closed),
            _ => None,
        }
    }

    /// `Occupied` only means someone is playing right now.
    pub fn accepts_bookings(&self) -> bool {
        match self {
            CourtStatus::Available | CourtStatus::Occupied => true,
            CourtStatus::Maintenance | CourtStatus::Closed => false,
        }
    }
}
