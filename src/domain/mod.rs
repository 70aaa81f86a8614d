//! Core business entities, the availability engine and repository traits

pub mod availability;
pub mod booking;
pub mod customer;
pub mod error;
pub mod payment;
pub mod repositories;
pub mod room;
pub mod service;
pub mod staff;

// Re-export commonly used types
pub use availability::{AvailabilityEngine, StayInterval};
pub use booking::{Booking, BookingStatus, NewBooking, OCCUPYING_STATUSES};
pub use customer::Customer;
pub use error::{DomainError, DomainResult, IntervalError};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use repositories::RepositoryProvider;
pub use room::{Room, RoomStatus, RoomType};
pub use service::{BookingService, Service, ServiceAvailability};
pub use staff::{Capability, Staff, StaffRole, StaffStatus};
