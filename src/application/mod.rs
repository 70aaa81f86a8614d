//! Business use cases built on the domain layer

pub mod booking;
pub mod reporting;

pub use booking::{BookingService, CreateBooking};
pub use reporting::ReportingService;
