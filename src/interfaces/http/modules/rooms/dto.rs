//! Room DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Room, RoomStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub room_number: String,
    pub room_type: String,
    #[schema(value_type = String)]
    pub price_per_night: Decimal,
    pub max_occupancy: i32,
    pub floor: Option<i32>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    /// Display status, recomputed from booking state on read
    pub status: String,
    pub created_at: String,
}

impl RoomDto {
    /// Build from a room plus a freshly derived display status.
    pub fn with_status(room: Room, status: RoomStatus) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type.as_str().to_string(),
            price_per_night: room.price_per_night,
            max_occupancy: room.max_occupancy,
            floor: room.floor,
            description: room.description,
            amenities: room.amenities,
            status: status.as_str().to_string(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        let status = room.status;
        Self::with_status(room, status)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 10))]
    pub room_number: String,
    /// Single, Double, Suite, Deluxe or Family
    pub room_type: String,
    #[schema(value_type = String)]
    pub price_per_night: Decimal,
    #[validate(range(min = 1, max = 20))]
    pub max_occupancy: i32,
    pub floor: Option<i32>,
    pub description: Option<String>,
    pub amenities: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 10))]
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price_per_night: Option<Decimal>,
    #[validate(range(min = 1, max = 20))]
    pub max_occupancy: Option<i32>,
    pub floor: Option<i32>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    /// Available, Occupied, Reserved, Maintenance or Cleaning
    pub status: Option<String>,
}

/// Query parameters for the availability listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD, exclusive)
    pub check_out: String,
    /// Optional exact room type filter
    pub room_type: Option<String>,
}
