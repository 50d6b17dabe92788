pub mod booking;
pub mod court;
pub mod dashboard;
pub mod interval;
pub mod slot;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use court::{Court, CourtStatus};
pub use dashboard::UserDashboard;
pub use interval::TimeInterval;
pub use slot::Slot;
