//! Ancillary service catalog and booking service lines

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAvailability {
    Available,
    Unavailable,
}

impl ServiceAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// A bookable extra (spa, laundry, room service, ...)
#[derive(Debug, Clone)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Price per unit
    pub price: Decimal,
    pub category: String,
    pub availability: ServiceAvailability,
    pub created_at: DateTime<Utc>,
}

/// A service charged to a booking.
///
/// Adding or removing a line adjusts the booking's `total_amount` by
/// `total_price`.
#[derive(Debug, Clone)]
pub struct BookingService {
    pub id: i32,
    pub booking_id: i32,
    pub service_id: i32,
    pub quantity: i32,
    /// `quantity * service.price` at the time the line was added
    pub total_price: Decimal,
    pub service_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
