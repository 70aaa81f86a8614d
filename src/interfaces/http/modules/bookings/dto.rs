//! Booking DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Booking;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub room_id: i32,
    pub customer_id: i32,
    pub check_in: NaiveDate,
    /// Exclusive: the check-out day is not occupied
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: String,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub created_at: String,
    /// Customer summary for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
}

impl BookingDto {
    pub fn from_booking(b: &Booking) -> Self {
        Self {
            id: b.id,
            room_id: b.room_id,
            customer_id: b.customer_id,
            check_in: b.interval.check_in(),
            check_out: b.interval.check_out(),
            nights: b.interval.nights(),
            guests: b.guests,
            special_requests: b.special_requests.clone(),
            status: b.status.as_str().to_string(),
            total_amount: b.total_amount,
            created_at: b.created_at.to_rfc3339(),
            customer_name: None,
            room_number: None,
        }
    }

    pub fn with_summary(
        b: &Booking,
        customer_name: Option<String>,
        room_number: Option<String>,
    ) -> Self {
        Self {
            customer_name,
            room_number,
            ..Self::from_booking(b)
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub customer_id: i32,
    pub room_id: i32,
    /// YYYY-MM-DD
    pub check_in: String,
    /// YYYY-MM-DD, exclusive
    pub check_out: String,
    #[validate(range(min = 1))]
    pub guests: i32,
    pub special_requests: Option<String>,
    /// Pending or Confirmed; defaults to Confirmed
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    /// Move the stay to another room
    pub room_id: Option<i32>,
    /// New check-in date; must be given together with check_out
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[validate(range(min = 1))]
    pub guests: Option<i32>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    /// Pending, Confirmed, Checked-in, Checked-out or Cancelled
    pub status: String,
}

/// Query parameters for the point availability check
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckAvailabilityParams {
    pub room_id: i32,
    /// YYYY-MM-DD
    pub check_in: String,
    /// YYYY-MM-DD, exclusive
    pub check_out: String,
    /// Booking to ignore (when re-validating an edit)
    pub exclude_booking_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityCheckResponse {
    pub room_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub available: bool,
}
