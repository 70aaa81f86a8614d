pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, NewBooking, OCCUPYING_STATUSES};
pub use repository::BookingRepository;
