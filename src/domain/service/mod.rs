pub mod model;
pub mod repository;

pub use model::{BookingService, Service, ServiceAvailability};
pub use repository::{BookingServiceRepository, ServiceRepository};
