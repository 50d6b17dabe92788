pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod locks;
pub mod pricing;
pub mod slots;
pub mod store;
